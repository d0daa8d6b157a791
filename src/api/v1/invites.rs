//! Invite endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::invite::Invite;
use crate::domain::team::Member;
use crate::infrastructure::invite::{CreateInviteRequest, UpdateInviteRequest};

/// Request body for POST /v1/teams/{team_id}/invites
///
/// `uses_left` omitted or negative applies the configured default;
/// `days_valid` omitted or 0 applies the configured window, negative means
/// the invite never expires.
#[derive(Debug, Deserialize)]
pub struct CreateInviteBody {
    #[serde(default)]
    pub uses_left: Option<i64>,
    #[serde(default)]
    pub days_valid: f64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for PATCH /v1/invites/{invite_id}; omitted fields preserved
#[derive(Debug, Deserialize, Default)]
pub struct UpdateInviteBody {
    #[serde(default)]
    pub uses_left: Option<i64>,
    #[serde(default)]
    pub days_valid: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for POST /v1/invites/accept
#[derive(Debug, Deserialize)]
pub struct AcceptInviteBody {
    pub token: String,
    pub account_id: String,
}

/// POST /v1/teams/{team_id}/invites
pub async fn create_invite(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<CreateInviteBody>,
) -> Result<(StatusCode, Json<Invite>), ApiError> {
    let invite = state
        .invite_service
        .create(
            &team_id,
            CreateInviteRequest {
                uses_left: body.uses_left,
                days_valid: body.days_valid,
                note: body.note,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(invite)))
}

/// GET /v1/teams/{team_id}/invites
pub async fn list_invites(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<Invite>>, ApiError> {
    let invites = state.invite_service.list(&team_id).await?;
    Ok(Json(invites))
}

/// GET /v1/invites/{invite_id}
pub async fn get_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
) -> Result<Json<Invite>, ApiError> {
    let invite = state
        .invite_service
        .get(&invite_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Invite '{}' not found", invite_id)))?;

    Ok(Json(invite))
}

/// PATCH /v1/invites/{invite_id}
pub async fn update_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
    Json(body): Json<UpdateInviteBody>,
) -> Result<Json<Invite>, ApiError> {
    let invite = state
        .invite_service
        .update(
            &invite_id,
            UpdateInviteRequest {
                uses_left: body.uses_left,
                days_valid: body.days_valid,
                note: body.note,
            },
        )
        .await?;

    Ok(Json(invite))
}

/// DELETE /v1/invites/{invite_id}
pub async fn delete_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.invite_service.delete(&invite_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Invite '{}' not found",
            invite_id
        )))
    }
}

/// POST /v1/invites/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    Json(body): Json<AcceptInviteBody>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let member = state
        .invite_service
        .accept(&body.token, &body.account_id)
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_invite_body_defaults() {
        let body: CreateInviteBody = serde_json::from_str("{}").unwrap();

        assert!(body.uses_left.is_none());
        assert_eq!(body.days_valid, 0.0);
        assert!(body.note.is_none());
    }

    #[test]
    fn test_create_invite_body_explicit() {
        let json = r#"{"uses_left":-1,"days_valid":-1,"note":"permanent"}"#;
        let body: CreateInviteBody = serde_json::from_str(json).unwrap();

        assert_eq!(body.uses_left, Some(-1));
        assert_eq!(body.days_valid, -1.0);
        assert_eq!(body.note.as_deref(), Some("permanent"));
    }

    #[test]
    fn test_update_invite_body_partial() {
        let body: UpdateInviteBody = serde_json::from_str(r#"{"days_valid":2.5}"#).unwrap();

        assert!(body.uses_left.is_none());
        assert_eq!(body.days_valid, Some(2.5));
        assert!(body.note.is_none());
    }

    #[test]
    fn test_accept_invite_body() {
        let json = r#"{"token":"inv_abc","account_id":"8d8d1f9c-1bf4-44b4-9d0e-3f7a4a7c9a11"}"#;
        let body: AcceptInviteBody = serde_json::from_str(json).unwrap();

        assert_eq!(body.token, "inv_abc");
    }
}
