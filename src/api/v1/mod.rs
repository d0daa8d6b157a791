//! v1 API endpoints

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use super::state::AppState;

pub mod club_auth;
pub mod clubs;
pub mod invites;
pub mod teams;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Teams and memberships
        .route("/teams", post(teams::create_team))
        .route("/teams", get(teams::list_teams))
        .route("/teams/{team_id}", get(teams::get_team))
        .route("/teams/{team_id}", patch(teams::update_team))
        .route("/teams/{team_id}", delete(teams::delete_team))
        .route("/teams/{team_id}/leave", post(teams::leave_team))
        .route("/teams/{team_id}/members", get(teams::list_members))
        .route(
            "/teams/{team_id}/members/{member_id}/role",
            put(teams::change_member_role),
        )
        .route(
            "/teams/{team_id}/members/{member_id}",
            delete(teams::remove_member),
        )
        // Invites
        .route("/teams/{team_id}/invites", post(invites::create_invite))
        .route("/teams/{team_id}/invites", get(invites::list_invites))
        .route("/invites/{invite_id}", get(invites::get_invite))
        .route("/invites/{invite_id}", patch(invites::update_invite))
        .route("/invites/{invite_id}", delete(invites::delete_invite))
        .route("/invites/accept", post(invites::accept_invite))
        // Clubs and their member registry
        .route("/clubs", post(clubs::create_club))
        .route("/clubs", get(clubs::list_clubs))
        .route("/clubs/{club_id}", get(clubs::get_club))
        .route("/clubs/{club_id}", patch(clubs::update_club))
        .route("/clubs/{club_id}", delete(clubs::delete_club))
        .route("/clubs/{club_id}/members", post(clubs::register_member))
        .route("/clubs/{club_id}/members", get(clubs::list_club_members))
        .route("/club-members/{member_id}", get(clubs::get_club_member))
        .route("/club-members/{member_id}", patch(clubs::update_club_member))
        .route(
            "/club-members/{member_id}",
            delete(clubs::delete_club_member),
        )
        // Passwordless club login
        .route("/clubs/{club_id}/login", post(club_auth::request_login))
        .route("/club-sessions", post(club_auth::session_login))
        .route(
            "/clubs/{club_id}/members/{member_id}/session",
            get(club_auth::session_status),
        )
        .route(
            "/clubs/{club_id}/members/{member_id}/logout",
            post(club_auth::session_logout),
        )
}
