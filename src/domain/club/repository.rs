//! Club and club member repository traits

use async_trait::async_trait;

use super::entity::{Club, ClubId, ClubMember, ClubMemberId};
use crate::domain::DomainError;

/// Repository for managing clubs
#[async_trait]
pub trait ClubRepository: Send + Sync + std::fmt::Debug {
    /// Get a club by ID
    async fn get(&self, id: &ClubId) -> Result<Option<Club>, DomainError>;

    /// Create a new club
    async fn create(&self, club: Club) -> Result<Club, DomainError>;

    /// Update an existing club
    async fn update(&self, club: Club) -> Result<Club, DomainError>;

    /// Delete a club by ID
    async fn delete(&self, id: &ClubId) -> Result<bool, DomainError>;

    /// List all clubs
    async fn list(&self) -> Result<Vec<Club>, DomainError>;
}

/// Repository for managing club members
///
/// Enforces the (club, email) uniqueness constraint: `create` and email
/// updates fail with a conflict when the address is already registered in
/// the club.
#[async_trait]
pub trait ClubMemberRepository: Send + Sync + std::fmt::Debug {
    /// Get a member by ID
    async fn get(&self, id: &ClubMemberId) -> Result<Option<ClubMember>, DomainError>;

    /// Find a member of a club by email address (case-insensitive)
    async fn find_by_email(
        &self,
        club_id: &ClubId,
        email: &str,
    ) -> Result<Option<ClubMember>, DomainError>;

    /// Create a new member
    async fn create(&self, member: ClubMember) -> Result<ClubMember, DomainError>;

    /// Update an existing member
    async fn update(&self, member: ClubMember) -> Result<ClubMember, DomainError>;

    /// Delete a member by ID
    async fn delete(&self, id: &ClubMemberId) -> Result<bool, DomainError>;

    /// List all members of a club
    async fn list_by_club(&self, club_id: &ClubId) -> Result<Vec<ClubMember>, DomainError>;
}
