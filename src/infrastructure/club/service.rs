//! Club service for club and club member management

use std::sync::Arc;

use tracing::info;

use crate::domain::club::{
    Club, ClubId, ClubMember, ClubMemberContact, ClubMemberId, ClubMemberRepository,
    ClubRepository,
};
use crate::domain::DomainError;

/// Request for creating a new club
#[derive(Debug, Clone)]
pub struct CreateClubRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Request for updating a club
#[derive(Debug, Clone)]
pub struct UpdateClubRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request for registering a club member
#[derive(Debug, Clone)]
pub struct RegisterMemberRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub contact: Option<ClubMemberContact>,
}

/// Request for partially updating a club member
#[derive(Debug, Clone, Default)]
pub struct UpdateMemberRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact: Option<ClubMemberContact>,
}

/// Club service for managing clubs and their member registry
#[derive(Debug)]
pub struct ClubService {
    clubs: Arc<dyn ClubRepository>,
    members: Arc<dyn ClubMemberRepository>,
}

impl ClubService {
    /// Create a new club service
    pub fn new(clubs: Arc<dyn ClubRepository>, members: Arc<dyn ClubMemberRepository>) -> Self {
        Self { clubs, members }
    }

    /// Create a new club
    pub async fn create(&self, request: CreateClubRequest) -> Result<Club, DomainError> {
        info!(name = %request.name, "Creating club");

        let mut club = Club::new(ClubId::generate(), &request.name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(desc) = request.description {
            club.set_description(desc);
        }

        self.clubs.create(club).await
    }

    /// Get a club by ID
    pub async fn get(&self, id: &str) -> Result<Option<Club>, DomainError> {
        let club_id = ClubId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.clubs.get(&club_id).await
    }

    /// List all clubs
    pub async fn list(&self) -> Result<Vec<Club>, DomainError> {
        self.clubs.list().await
    }

    /// Update a club
    pub async fn update(&self, id: &str, request: UpdateClubRequest) -> Result<Club, DomainError> {
        info!(id = %id, "Updating club");

        let club_id = ClubId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut club = self
            .clubs
            .get(&club_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Club '{}' not found", id)))?;

        if let Some(name) = request.name {
            club.set_name(&name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(desc) = request.description {
            club.set_description(desc);
        }

        self.clubs.update(club).await
    }

    /// Delete a club and its member registry
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting club");

        let club_id = ClubId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.clubs.get(&club_id).await?.is_none() {
            return Ok(false);
        }

        for member in self.members.list_by_club(&club_id).await? {
            self.members.delete(member.id()).await?;
        }

        self.clubs.delete(&club_id).await
    }

    /// Register a member in a club
    ///
    /// Fails with a conflict when the email is already registered in the
    /// club; the same address may be registered in different clubs.
    pub async fn register_member(
        &self,
        club_id: &str,
        request: RegisterMemberRequest,
    ) -> Result<ClubMember, DomainError> {
        info!(club_id = %club_id, "Registering club member");

        let club_id = ClubId::new(club_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.clubs.get(&club_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Club '{}' not found",
                club_id
            )));
        }

        let mut member = ClubMember::new(
            club_id,
            request.email,
            request.first_name,
            request.last_name,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(contact) = request.contact {
            member = member.with_contact(contact);
        }

        self.members.create(member).await
    }

    /// Get a club member by ID
    pub async fn get_member(&self, id: &str) -> Result<Option<ClubMember>, DomainError> {
        let member_id =
            ClubMemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.members.get(&member_id).await
    }

    /// List the members of a club
    pub async fn list_members(&self, club_id: &str) -> Result<Vec<ClubMember>, DomainError> {
        let club_id = ClubId::new(club_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.clubs.get(&club_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Club '{}' not found",
                club_id
            )));
        }

        self.members.list_by_club(&club_id).await
    }

    /// Partially update a club member
    pub async fn update_member(
        &self,
        id: &str,
        request: UpdateMemberRequest,
    ) -> Result<ClubMember, DomainError> {
        info!(id = %id, "Updating club member");

        let member_id =
            ClubMemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut member = self
            .members
            .get(&member_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Club member '{}' not found", id)))?;

        if let Some(email) = request.email {
            member
                .set_email(email)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(name) = request.first_name {
            member
                .set_first_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(name) = request.last_name {
            member
                .set_last_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(contact) = request.contact {
            member.set_contact(contact);
        }

        self.members.update(member).await
    }

    /// Delete a club member
    pub async fn delete_member(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting club member");

        let member_id =
            ClubMemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.members.delete(&member_id).await
    }
}
