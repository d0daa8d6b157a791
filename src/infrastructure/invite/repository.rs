//! Storage-backed invite repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::invite::{Invite, InviteId, InviteRepository};
use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Storage-backed implementation of InviteRepository
#[derive(Debug)]
pub struct StorageInviteRepository {
    storage: Arc<dyn Storage<Invite>>,
}

impl StorageInviteRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Invite>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl InviteRepository for StorageInviteRepository {
    async fn get(&self, id: &InviteId) -> Result<Option<Invite>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Invite>, DomainError> {
        let invites = self.storage.list().await?;
        Ok(invites.into_iter().find(|i| i.token() == token))
    }

    async fn create(&self, invite: Invite) -> Result<Invite, DomainError> {
        if self.find_by_token(invite.token()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Invite token '{}' already exists",
                invite.token()
            )));
        }

        self.storage.create(invite).await
    }

    async fn update(&self, invite: Invite) -> Result<Invite, DomainError> {
        if self.storage.get(invite.id()).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Invite '{}' not found",
                invite.id()
            )));
        }

        self.storage.update(invite).await
    }

    async fn delete(&self, id: &InviteId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Invite>, DomainError> {
        let invites = self.storage.list().await?;
        let mut result: Vec<Invite> = invites
            .into_iter()
            .filter(|i| i.team_id() == team_id)
            .collect();

        // Soonest expiry first, never-expiring invites last
        result.sort_by(|a, b| match (a.valid_until(), b.valid_until()) {
            (Some(a_until), Some(b_until)) => a_until.cmp(&b_until),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.created_at().cmp(&b.created_at()),
        });

        Ok(result)
    }

    async fn consume_use(&self, id: &InviteId) -> Result<Invite, DomainError> {
        self.storage
            .modify(
                id,
                Box::new(|invite| {
                    if invite.record_use() {
                        Ok(())
                    } else {
                        Err(DomainError::invite_invalid("Invite has no uses left"))
                    }
                }),
            )
            .await
    }

    async fn restore_use(&self, id: &InviteId) -> Result<Invite, DomainError> {
        self.storage
            .modify(
                id,
                Box::new(|invite| {
                    invite.restore_use();
                    Ok(())
                }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageInviteRepository {
        StorageInviteRepository::new(Arc::new(InMemoryStorage::<Invite>::new()))
    }

    #[tokio::test]
    async fn test_create_and_find_by_token() {
        let repo = create_repo();
        let invite = Invite::new(TeamId::generate(), "inv_abc", 5);

        repo.create(invite).await.unwrap();

        let found = repo.find_by_token("inv_abc").await.unwrap().unwrap();
        assert_eq!(found.uses_left(), 5);

        assert!(repo.find_by_token("inv_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_token() {
        let repo = create_repo();

        repo.create(Invite::new(TeamId::generate(), "inv_abc", 5))
            .await
            .unwrap();

        let result = repo
            .create(Invite::new(TeamId::generate(), "inv_abc", 1))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_list_by_team_ordered_by_expiry() {
        let repo = create_repo();
        let team_id = TeamId::generate();
        let now = Utc::now();

        repo.create(
            Invite::new(team_id.clone(), "inv_never", 1).with_valid_until(None),
        )
        .await
        .unwrap();
        repo.create(
            Invite::new(team_id.clone(), "inv_late", 1)
                .with_valid_until(Some(now + Duration::days(30))),
        )
        .await
        .unwrap();
        repo.create(
            Invite::new(team_id.clone(), "inv_soon", 1)
                .with_valid_until(Some(now + Duration::days(1))),
        )
        .await
        .unwrap();
        repo.create(Invite::new(TeamId::generate(), "inv_other", 1))
            .await
            .unwrap();

        let invites = repo.list_by_team(&team_id).await.unwrap();
        let tokens: Vec<&str> = invites.iter().map(|i| i.token()).collect();
        assert_eq!(tokens, vec!["inv_soon", "inv_late", "inv_never"]);
    }

    #[tokio::test]
    async fn test_consume_use_decrements() {
        let repo = create_repo();
        let invite = Invite::new(TeamId::generate(), "inv_abc", 2);
        let id = invite.id().clone();
        repo.create(invite).await.unwrap();

        let consumed = repo.consume_use(&id).await.unwrap();
        assert_eq!(consumed.uses_left(), 1);
        assert_eq!(consumed.uses_used(), 1);
    }

    #[tokio::test]
    async fn test_consume_use_refuses_exhausted() {
        let repo = create_repo();
        let invite = Invite::new(TeamId::generate(), "inv_abc", 1);
        let id = invite.id().clone();
        repo.create(invite).await.unwrap();

        repo.consume_use(&id).await.unwrap();

        let result = repo.consume_use(&id).await;
        assert!(matches!(result, Err(DomainError::InviteInvalid { .. })));

        // Counters untouched by the refused attempt
        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.uses_left(), 0);
        assert_eq!(stored.uses_used(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_last_use() {
        let repo = Arc::new(create_repo());
        let invite = Invite::new(TeamId::generate(), "inv_last", 1);
        let id = invite.id().clone();
        repo.create(invite).await.unwrap();

        let mut handles = Vec::new();

        for _ in 0..8 {
            let repo = Arc::clone(&repo);
            let id = id.clone();
            handles.push(tokio::spawn(async move { repo.consume_use(&id).await }));
        }

        let mut successes = 0;

        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.uses_left(), 0);
        assert_eq!(stored.uses_used(), 1);
    }

    #[tokio::test]
    async fn test_restore_use_undoes_consume() {
        let repo = create_repo();
        let invite = Invite::new(TeamId::generate(), "inv_abc", 1);
        let id = invite.id().clone();
        repo.create(invite).await.unwrap();

        repo.consume_use(&id).await.unwrap();

        let restored = repo.restore_use(&id).await.unwrap();
        assert_eq!(restored.uses_left(), 1);
        assert_eq!(restored.uses_used(), 0);

        // The use is redeemable again
        repo.consume_use(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_consume_use_missing_invite() {
        let repo = create_repo();
        let orphan = Invite::new(TeamId::generate(), "inv_none", 1);

        let result = repo.consume_use(orphan.id()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = create_repo();
        let invite = Invite::new(TeamId::generate(), "inv_abc", 1);
        let id = invite.id().clone();
        repo.create(invite).await.unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
    }
}
