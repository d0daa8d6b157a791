//! Application state for shared services

use std::sync::Arc;

use crate::domain::auth::SessionStore;
use crate::infrastructure::auth::ClubAuthService;
use crate::infrastructure::club::ClubService;
use crate::infrastructure::invite::InviteService;
use crate::infrastructure::team::TeamService;

/// Application state containing the shared services
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<TeamService>,
    pub invite_service: Arc<InviteService>,
    pub club_service: Arc<ClubService>,
    pub club_auth_service: Arc<ClubAuthService>,
    pub session_store: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        team_service: Arc<TeamService>,
        invite_service: Arc<InviteService>,
        club_service: Arc<ClubService>,
        club_auth_service: Arc<ClubAuthService>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            team_service,
            invite_service,
            club_service,
            club_auth_service,
            session_store,
        }
    }
}
