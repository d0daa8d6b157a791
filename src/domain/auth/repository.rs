//! Repository and collaborator traits for the club auth flow

use async_trait::async_trait;

use super::entity::{ClubSession, MagicLink, MagicToken, SessionToken};
use crate::domain::club::{ClubId, ClubMemberId};
use crate::domain::DomainError;

/// Repository for magic link credentials
#[async_trait]
pub trait MagicLinkRepository: Send + Sync + std::fmt::Debug {
    /// Get a link by token
    async fn get(&self, token: &MagicToken) -> Result<Option<MagicLink>, DomainError>;

    /// Create a new link
    async fn create(&self, link: MagicLink) -> Result<MagicLink, DomainError>;

    /// Delete a link by token, returns true if deleted
    async fn delete(&self, token: &MagicToken) -> Result<bool, DomainError>;

    /// List all outstanding links of a member
    async fn list_by_member(
        &self,
        member_id: &ClubMemberId,
    ) -> Result<Vec<MagicLink>, DomainError>;
}

/// Repository for club session credentials
#[async_trait]
pub trait SessionRepository: Send + Sync + std::fmt::Debug {
    /// Get a session by token
    async fn get(&self, token: &SessionToken) -> Result<Option<ClubSession>, DomainError>;

    /// Create a new session
    async fn create(&self, session: ClubSession) -> Result<ClubSession, DomainError>;

    /// Delete a session by token, returns true if deleted
    async fn delete(&self, token: &SessionToken) -> Result<bool, DomainError>;

    /// List all sessions of a member
    async fn list_by_member(
        &self,
        member_id: &ClubMemberId,
    ) -> Result<Vec<ClubSession>, DomainError>;
}

/// Client-side session state, injected by the caller.
///
/// Maps a (club, member) pair to the session token the client holds. The
/// hosting environment owns transport, serialization and expiry of the
/// store itself (signed cookie, server-side session table, ...); this
/// component only reads and writes entries.
pub trait SessionStore: Send + Sync {
    /// Look up the stored session token for a member
    fn get(&self, club_id: &ClubId, member_id: &ClubMemberId) -> Option<SessionToken>;

    /// Record the session token for a member
    fn set(&self, club_id: &ClubId, member_id: &ClubMemberId, token: SessionToken);

    /// Remove the entry for a member
    fn remove(&self, club_id: &ClubId, member_id: &ClubMemberId);
}

/// Outgoing email collaborator. Best effort; delivery is out of scope.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError>;
}
