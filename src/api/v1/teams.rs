//! Team endpoint handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::team::{Member, Team, TeamRole};
use crate::infrastructure::team::{CreateTeamRequest, UpdateTeamRequest};

/// Request body for POST /v1/teams
#[derive(Debug, Deserialize)]
pub struct CreateTeamBody {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response for POST /v1/teams
#[derive(Debug, Serialize)]
pub struct CreateTeamResponse {
    pub team: Team,
    pub owner: Member,
}

/// Query parameters for GET /v1/teams
#[derive(Debug, Deserialize)]
pub struct ListTeamsQuery {
    pub account_id: String,
}

/// Request body for PATCH /v1/teams/{team_id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTeamBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for POST /v1/teams/{team_id}/leave
#[derive(Debug, Deserialize)]
pub struct LeaveTeamBody {
    pub account_id: String,
}

/// Request body for PUT /v1/teams/{team_id}/members/{member_id}/role
#[derive(Debug, Deserialize)]
pub struct ChangeRoleBody {
    pub role: TeamRole,
}

/// POST /v1/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<CreateTeamBody>,
) -> Result<(StatusCode, Json<CreateTeamResponse>), ApiError> {
    let (team, owner) = state
        .team_service
        .create(
            &body.account_id,
            CreateTeamRequest {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreateTeamResponse { team, owner })))
}

/// GET /v1/teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Json<Vec<Team>>, ApiError> {
    debug!(account_id = %query.account_id, "Listing teams");

    let teams = state.team_service.list_for_account(&query.account_id).await?;
    Ok(Json(teams))
}

/// GET /v1/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = state
        .team_service
        .get(&team_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(team))
}

/// PATCH /v1/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<UpdateTeamBody>,
) -> Result<Json<Team>, ApiError> {
    let team = state
        .team_service
        .update(
            &team_id,
            UpdateTeamRequest {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok(Json(team))
}

/// DELETE /v1/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.team_service.delete(&team_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Team '{}' not found", team_id)))
    }
}

/// POST /v1/teams/{team_id}/leave
pub async fn leave_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<LeaveTeamBody>,
) -> Result<StatusCode, ApiError> {
    state.team_service.leave(&team_id, &body.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/teams/{team_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let members = state.team_service.members(&team_id).await?;
    Ok(Json(members))
}

/// PUT /v1/teams/{team_id}/members/{member_id}/role
pub async fn change_member_role(
    State(state): State<AppState>,
    Path((team_id, member_id)): Path<(String, String)>,
    Json(body): Json<ChangeRoleBody>,
) -> Result<Json<Member>, ApiError> {
    let member = state
        .team_service
        .change_role(&team_id, &member_id, body.role)
        .await?;

    Ok(Json(member))
}

/// DELETE /v1/teams/{team_id}/members/{member_id}
pub async fn remove_member(
    State(state): State<AppState>,
    Path((team_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.team_service.remove_member(&team_id, &member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_body_deserialization() {
        let json = r#"{"account_id":"8d8d1f9c-1bf4-44b4-9d0e-3f7a4a7c9a11","name":"My Team"}"#;
        let body: CreateTeamBody = serde_json::from_str(json).unwrap();

        assert_eq!(body.name, "My Team");
        assert!(body.description.is_none());
    }

    #[test]
    fn test_change_role_body_deserialization() {
        let body: ChangeRoleBody = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(body.role, TeamRole::Admin);

        assert!(serde_json::from_str::<ChangeRoleBody>(r#"{"role":"king"}"#).is_err());
    }

    #[test]
    fn test_update_team_body_partial() {
        let body: UpdateTeamBody = serde_json::from_str(r#"{"name":"New"}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("New"));
        assert!(body.description.is_none());
    }
}
