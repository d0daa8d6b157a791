//! Storage-backed team and member repository implementations

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::team::{
    AccountId, Member, MemberId, MemberRepository, Team, TeamId, TeamRepository,
};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        if self.storage.exists(team.id()).await? {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        self.storage.create(team).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        if !self.storage.exists(team.id()).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            )));
        }

        self.storage.update(team).await
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams = self.storage.list().await?;
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        self.storage.exists(id).await
    }
}

/// Storage-backed implementation of MemberRepository
#[derive(Debug)]
pub struct StorageMemberRepository {
    storage: Arc<dyn Storage<Member>>,
}

impl StorageMemberRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Member>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MemberRepository for StorageMemberRepository {
    async fn get(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_account(
        &self,
        team_id: &TeamId,
        account_id: &AccountId,
    ) -> Result<Option<Member>, DomainError> {
        let members = self.storage.list().await?;

        Ok(members
            .into_iter()
            .find(|m| m.team_id() == team_id && m.account_id() == account_id))
    }

    async fn create(&self, member: Member) -> Result<Member, DomainError> {
        // One membership per (account, team) pair
        if self
            .find_by_account(member.team_id(), member.account_id())
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "Account '{}' is already a member of team '{}'",
                member.account_id(),
                member.team_id()
            )));
        }

        self.storage.create(member).await
    }

    async fn update(&self, member: Member) -> Result<Member, DomainError> {
        if self.storage.get(member.id()).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Member '{}' not found",
                member.id()
            )));
        }

        self.storage.update(member).await
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Member>, DomainError> {
        let members = self.storage.list().await?;
        let mut result: Vec<Member> = members
            .into_iter()
            .filter(|m| m.team_id() == team_id)
            .collect();

        result.sort_by_key(|m| m.created_at());
        Ok(result)
    }

    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Member>, DomainError> {
        let members = self.storage.list().await?;
        let mut result: Vec<Member> = members
            .into_iter()
            .filter(|m| m.account_id() == account_id)
            .collect();

        result.sort_by_key(|m| m.created_at());
        Ok(result)
    }
}
