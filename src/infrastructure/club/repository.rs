//! Storage-backed club and club member repository implementations

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::club::{
    Club, ClubId, ClubMember, ClubMemberId, ClubMemberRepository, ClubRepository,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of ClubRepository
#[derive(Debug)]
pub struct StorageClubRepository {
    storage: Arc<dyn Storage<Club>>,
}

impl StorageClubRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Club>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ClubRepository for StorageClubRepository {
    async fn get(&self, id: &ClubId) -> Result<Option<Club>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, club: Club) -> Result<Club, DomainError> {
        if self.storage.exists(club.id()).await? {
            return Err(DomainError::conflict(format!(
                "Club '{}' already exists",
                club.id()
            )));
        }

        self.storage.create(club).await
    }

    async fn update(&self, club: Club) -> Result<Club, DomainError> {
        if !self.storage.exists(club.id()).await? {
            return Err(DomainError::not_found(format!(
                "Club '{}' not found",
                club.id()
            )));
        }

        self.storage.update(club).await
    }

    async fn delete(&self, id: &ClubId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Club>, DomainError> {
        let mut clubs = self.storage.list().await?;
        clubs.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(clubs)
    }
}

/// Storage-backed implementation of ClubMemberRepository
#[derive(Debug)]
pub struct StorageClubMemberRepository {
    storage: Arc<dyn Storage<ClubMember>>,
}

impl StorageClubMemberRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<ClubMember>>) -> Self {
        Self { storage }
    }

    async fn email_taken(
        &self,
        club_id: &ClubId,
        email: &str,
        exclude: &ClubMemberId,
    ) -> Result<bool, DomainError> {
        let members = self.storage.list().await?;
        let email = email.to_lowercase();

        Ok(members
            .iter()
            .any(|m| m.club_id() == club_id && m.email() == email && m.id() != exclude))
    }
}

#[async_trait]
impl ClubMemberRepository for StorageClubMemberRepository {
    async fn get(&self, id: &ClubMemberId) -> Result<Option<ClubMember>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_email(
        &self,
        club_id: &ClubId,
        email: &str,
    ) -> Result<Option<ClubMember>, DomainError> {
        let members = self.storage.list().await?;
        let email = email.to_lowercase();

        Ok(members
            .into_iter()
            .find(|m| m.club_id() == club_id && m.email() == email))
    }

    async fn create(&self, member: ClubMember) -> Result<ClubMember, DomainError> {
        // One member per (club, email) pair
        if self
            .find_by_email(member.club_id(), member.email())
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered in club '{}'",
                member.email(),
                member.club_id()
            )));
        }

        self.storage.create(member).await
    }

    async fn update(&self, member: ClubMember) -> Result<ClubMember, DomainError> {
        if self.storage.get(member.id()).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Club member '{}' not found",
                member.id()
            )));
        }

        // An email change must not collide with another member of the club
        if self
            .email_taken(member.club_id(), member.email(), member.id())
            .await?
        {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered in club '{}'",
                member.email(),
                member.club_id()
            )));
        }

        self.storage.update(member).await
    }

    async fn delete(&self, id: &ClubMemberId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list_by_club(&self, club_id: &ClubId) -> Result<Vec<ClubMember>, DomainError> {
        let members = self.storage.list().await?;
        let mut result: Vec<ClubMember> = members
            .into_iter()
            .filter(|m| m.club_id() == club_id)
            .collect();

        result.sort_by(|a, b| {
            (a.last_name(), a.first_name()).cmp(&(b.last_name(), b.first_name()))
        });
        Ok(result)
    }
}
