//! Club endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::club::{Club, ClubMember, ClubMemberContact};
use crate::infrastructure::club::{
    CreateClubRequest, RegisterMemberRequest, UpdateClubRequest, UpdateMemberRequest,
};

/// Request body for POST /v1/clubs
#[derive(Debug, Deserialize)]
pub struct CreateClubBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for PATCH /v1/clubs/{club_id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateClubBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for POST /v1/clubs/{club_id}/members
#[derive(Debug, Deserialize)]
pub struct RegisterMemberBody {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub contact: Option<ClubMemberContact>,
}

/// Request body for PATCH /v1/club-members/{member_id}; omitted fields preserved
#[derive(Debug, Deserialize, Default)]
pub struct UpdateMemberBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub contact: Option<ClubMemberContact>,
}

/// POST /v1/clubs
pub async fn create_club(
    State(state): State<AppState>,
    Json(body): Json<CreateClubBody>,
) -> Result<(StatusCode, Json<Club>), ApiError> {
    let club = state
        .club_service
        .create(CreateClubRequest {
            name: body.name,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(club)))
}

/// GET /v1/clubs
pub async fn list_clubs(State(state): State<AppState>) -> Result<Json<Vec<Club>>, ApiError> {
    Ok(Json(state.club_service.list().await?))
}

/// GET /v1/clubs/{club_id}
pub async fn get_club(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Result<Json<Club>, ApiError> {
    let club = state
        .club_service
        .get(&club_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Club '{}' not found", club_id)))?;

    Ok(Json(club))
}

/// PATCH /v1/clubs/{club_id}
pub async fn update_club(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(body): Json<UpdateClubBody>,
) -> Result<Json<Club>, ApiError> {
    let club = state
        .club_service
        .update(
            &club_id,
            UpdateClubRequest {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok(Json(club))
}

/// DELETE /v1/clubs/{club_id}
pub async fn delete_club(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.club_service.delete(&club_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Club '{}' not found", club_id)))
    }
}

/// POST /v1/clubs/{club_id}/members
pub async fn register_member(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(body): Json<RegisterMemberBody>,
) -> Result<(StatusCode, Json<ClubMember>), ApiError> {
    let member = state
        .club_service
        .register_member(
            &club_id,
            RegisterMemberRequest {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                contact: body.contact,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /v1/clubs/{club_id}/members
pub async fn list_club_members(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Result<Json<Vec<ClubMember>>, ApiError> {
    Ok(Json(state.club_service.list_members(&club_id).await?))
}

/// GET /v1/club-members/{member_id}
pub async fn get_club_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<ClubMember>, ApiError> {
    let member = state
        .club_service
        .get_member(&member_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Club member '{}' not found", member_id)))?;

    Ok(Json(member))
}

/// PATCH /v1/club-members/{member_id}
pub async fn update_club_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(body): Json<UpdateMemberBody>,
) -> Result<Json<ClubMember>, ApiError> {
    let member = state
        .club_service
        .update_member(
            &member_id,
            UpdateMemberRequest {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                contact: body.contact,
            },
        )
        .await?;

    Ok(Json(member))
}

/// DELETE /v1/club-members/{member_id}
pub async fn delete_club_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.club_service.delete_member(&member_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Club member '{}' not found",
            member_id
        )))
    }
}
