//! Passwordless club login endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Request body for POST /v1/clubs/{club_id}/login
#[derive(Debug, Deserialize)]
pub struct RequestLoginBody {
    pub email: String,
}

/// Request body for POST /v1/club-sessions
#[derive(Debug, Deserialize)]
pub struct SessionLoginBody {
    pub member_id: String,
    pub token: String,
}

/// Login state response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginStateResponse {
    pub logged_in: bool,
}

/// POST /v1/clubs/{club_id}/login
///
/// Emails a magic link to the member registered under the given address.
pub async fn request_login(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(body): Json<RequestLoginBody>,
) -> Result<StatusCode, ApiError> {
    state
        .club_auth_service
        .request_magic_link(&club_id, &body.email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/club-sessions
///
/// Redeems a magic link token; a refused token yields `logged_in: false`
/// rather than an error.
pub async fn session_login(
    State(state): State<AppState>,
    Json(body): Json<SessionLoginBody>,
) -> Result<Json<LoginStateResponse>, ApiError> {
    let logged_in = state
        .club_auth_service
        .session_login(&body.member_id, &body.token, state.session_store.as_ref())
        .await?;

    Ok(Json(LoginStateResponse { logged_in }))
}

/// GET /v1/clubs/{club_id}/members/{member_id}/session
pub async fn session_status(
    State(state): State<AppState>,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<Json<LoginStateResponse>, ApiError> {
    let logged_in = state
        .club_auth_service
        .session_is_logged_in(&club_id, &member_id, state.session_store.as_ref())
        .await?;

    Ok(Json(LoginStateResponse { logged_in }))
}

/// POST /v1/clubs/{club_id}/members/{member_id}/logout
pub async fn session_logout(
    State(state): State<AppState>,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .club_auth_service
        .session_logout(&club_id, &member_id, state.session_store.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
