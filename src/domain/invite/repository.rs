//! Invite repository trait

use async_trait::async_trait;

use super::entity::{Invite, InviteId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Repository for managing invites
#[async_trait]
pub trait InviteRepository: Send + Sync + std::fmt::Debug {
    /// Get an invite by ID
    async fn get(&self, id: &InviteId) -> Result<Option<Invite>, DomainError>;

    /// Find an invite by its shareable token
    async fn find_by_token(&self, token: &str) -> Result<Option<Invite>, DomainError>;

    /// Create a new invite
    async fn create(&self, invite: Invite) -> Result<Invite, DomainError>;

    /// Update an existing invite
    async fn update(&self, invite: Invite) -> Result<Invite, DomainError>;

    /// Delete an invite by ID
    async fn delete(&self, id: &InviteId) -> Result<bool, DomainError>;

    /// List all invites of a team, ordered by expiry
    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Invite>, DomainError>;

    /// Atomically consume one use of the invite.
    ///
    /// Decrements `uses_left` and increments `uses_used` as a single
    /// storage mutation. Fails with [`DomainError::InviteInvalid`] when no
    /// uses remain, so two concurrent redemptions of the last use cannot
    /// both succeed. Returns the invite after the decrement.
    async fn consume_use(&self, id: &InviteId) -> Result<Invite, DomainError>;

    /// Atomically return a previously consumed use.
    ///
    /// Inverse of [`consume_use`](Self::consume_use); applied when the
    /// join that must follow the decrement fails, so the counters do not
    /// drift from the memberships actually created.
    async fn restore_use(&self, id: &InviteId) -> Result<Invite, DomainError>;
}
