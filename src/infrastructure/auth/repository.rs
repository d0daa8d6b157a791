//! Storage-backed credential repository implementations

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::auth::{
    ClubSession, MagicLink, MagicLinkRepository, MagicToken, SessionRepository, SessionToken,
};
use crate::domain::club::ClubMemberId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of MagicLinkRepository
#[derive(Debug)]
pub struct StorageMagicLinkRepository {
    storage: Arc<dyn Storage<MagicLink>>,
}

impl StorageMagicLinkRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<MagicLink>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MagicLinkRepository for StorageMagicLinkRepository {
    async fn get(&self, token: &MagicToken) -> Result<Option<MagicLink>, DomainError> {
        self.storage.get(token).await
    }

    async fn create(&self, link: MagicLink) -> Result<MagicLink, DomainError> {
        self.storage.create(link).await
    }

    async fn delete(&self, token: &MagicToken) -> Result<bool, DomainError> {
        self.storage.delete(token).await
    }

    async fn list_by_member(
        &self,
        member_id: &ClubMemberId,
    ) -> Result<Vec<MagicLink>, DomainError> {
        let links = self.storage.list().await?;
        let mut result: Vec<MagicLink> = links
            .into_iter()
            .filter(|l| l.member_id() == member_id)
            .collect();

        result.sort_by_key(|l| l.created_at());
        Ok(result)
    }
}

/// Storage-backed implementation of SessionRepository
#[derive(Debug)]
pub struct StorageSessionRepository {
    storage: Arc<dyn Storage<ClubSession>>,
}

impl StorageSessionRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<ClubSession>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SessionRepository for StorageSessionRepository {
    async fn get(&self, token: &SessionToken) -> Result<Option<ClubSession>, DomainError> {
        self.storage.get(token).await
    }

    async fn create(&self, session: ClubSession) -> Result<ClubSession, DomainError> {
        self.storage.create(session).await
    }

    async fn delete(&self, token: &SessionToken) -> Result<bool, DomainError> {
        self.storage.delete(token).await
    }

    async fn list_by_member(
        &self,
        member_id: &ClubMemberId,
    ) -> Result<Vec<ClubSession>, DomainError> {
        let sessions = self.storage.list().await?;
        let mut result: Vec<ClubSession> = sessions
            .into_iter()
            .filter(|s| s.member_id() == member_id)
            .collect();

        result.sort_by_key(|s| s.created_at());
        Ok(result)
    }
}
