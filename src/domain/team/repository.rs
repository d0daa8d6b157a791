//! Team and member repository traits

use async_trait::async_trait;

use super::entity::{AccountId, Member, MemberId, Team, TeamId};
use crate::domain::DomainError;

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError>;

    /// List all teams
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError>;
}

/// Repository for managing team memberships
///
/// Enforces the (account, team) uniqueness constraint: `create` fails with
/// a conflict if the account already holds a membership in the team.
#[async_trait]
pub trait MemberRepository: Send + Sync + std::fmt::Debug {
    /// Get a membership by ID
    async fn get(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Find the membership of an account within a team
    async fn find_by_account(
        &self,
        team_id: &TeamId,
        account_id: &AccountId,
    ) -> Result<Option<Member>, DomainError>;

    /// Create a new membership
    async fn create(&self, member: Member) -> Result<Member, DomainError>;

    /// Update an existing membership
    async fn update(&self, member: Member) -> Result<Member, DomainError>;

    /// Delete a membership by ID
    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError>;

    /// List all memberships of a team
    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Member>, DomainError>;

    /// List all memberships held by an account
    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Member>, DomainError>;

    /// Count memberships of a team
    async fn count_by_team(&self, team_id: &TeamId) -> Result<usize, DomainError> {
        Ok(self.list_by_team(team_id).await?.len())
    }
}
