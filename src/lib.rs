//! Teamhub
//!
//! Multi-tenant team and club management core:
//! - Team invites: shareable, rate-limited, time-limited admission tokens
//! - Club member auth: emailed magic links redeemed into long-lived sessions

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::AppState;
use domain::auth::{ClubSession, MagicLink, MagicLinkRepository, Mailer, SessionRepository};
use domain::club::{Club, ClubMember, ClubMemberRepository, ClubRepository};
use domain::invite::{Invite, InviteRepository};
use domain::team::{Member, MemberRepository, Team, TeamRepository};
use infrastructure::auth::{
    ClubAuthService, InMemorySessionStore, StorageMagicLinkRepository, StorageSessionRepository,
    TracingMailer,
};
use infrastructure::club::{ClubService, StorageClubMemberRepository, StorageClubRepository};
use infrastructure::invite::{InviteService, StorageInviteRepository};
use infrastructure::storage::InMemoryStorage;
use infrastructure::team::{StorageMemberRepository, StorageTeamRepository, TeamService};

/// Wire up the application state on in-memory storage
pub fn create_app_state(config: &AppConfig) -> AppState {
    let teams: Arc<dyn TeamRepository> = Arc::new(StorageTeamRepository::new(Arc::new(
        InMemoryStorage::<Team>::new(),
    )));
    let members: Arc<dyn MemberRepository> = Arc::new(StorageMemberRepository::new(Arc::new(
        InMemoryStorage::<Member>::new(),
    )));
    let invites: Arc<dyn InviteRepository> = Arc::new(StorageInviteRepository::new(Arc::new(
        InMemoryStorage::<Invite>::new(),
    )));
    let clubs: Arc<dyn ClubRepository> = Arc::new(StorageClubRepository::new(Arc::new(
        InMemoryStorage::<Club>::new(),
    )));
    let club_members: Arc<dyn ClubMemberRepository> = Arc::new(StorageClubMemberRepository::new(
        Arc::new(InMemoryStorage::<ClubMember>::new()),
    ));
    let links: Arc<dyn MagicLinkRepository> = Arc::new(StorageMagicLinkRepository::new(Arc::new(
        InMemoryStorage::<MagicLink>::new(),
    )));
    let sessions: Arc<dyn SessionRepository> = Arc::new(StorageSessionRepository::new(Arc::new(
        InMemoryStorage::<ClubSession>::new(),
    )));
    let mailer: Arc<dyn Mailer> = Arc::new(TracingMailer::new());

    let team_service = Arc::new(TeamService::new(Arc::clone(&teams), Arc::clone(&members)));
    let invite_service = Arc::new(InviteService::new(
        invites,
        Arc::clone(&members),
        Arc::clone(&teams),
        config.invites.clone(),
    ));
    let club_service = Arc::new(ClubService::new(
        Arc::clone(&clubs),
        Arc::clone(&club_members),
    ));
    let club_auth_service = Arc::new(ClubAuthService::new(
        clubs,
        club_members,
        links,
        sessions,
        mailer,
        config.club_auth.clone(),
    ));

    AppState::new(
        team_service,
        invite_service,
        club_service,
        club_auth_service,
        Arc::new(InMemorySessionStore::new()),
    )
}
