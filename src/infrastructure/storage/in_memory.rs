//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{ModifyFn, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Backs the repositories in tests and single-process deployments. Data is
/// lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let storage = Self::new();
        {
            let mut map = storage.entities.write().unwrap();

            for entity in entities {
                map.insert(entity.key().as_str().to_string(), entity);
            }
        }
        storage
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if !entities.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    // Holds the write lock across the whole read-modify-write cycle; this
    // is what makes the invite counter decrement race-free.
    async fn modify(&self, key: &E::Key, f: ModifyFn<E>) -> Result<E, DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let entity = entities.get_mut(key.as_str()).ok_or_else(|| {
            DomainError::not_found(format!("Entity with key '{}' not found", key.as_str()))
        })?;

        f(entity)?;
        Ok(entity.clone())
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entities.remove(key.as_str()).is_some())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        entities.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invite::Invite;
    use crate::domain::team::TeamId;

    fn test_invite(uses: u32) -> Invite {
        Invite::new(TeamId::generate(), "inv_storage_test", uses)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = InMemoryStorage::<Invite>::new();
        let invite = test_invite(5);
        let id = invite.id().clone();

        storage.create(invite).await.unwrap();

        let fetched = storage.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.uses_left(), 5);
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let storage = InMemoryStorage::<Invite>::new();
        let invite = test_invite(5);

        storage.create(invite.clone()).await.unwrap();
        let result = storage.create(invite).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let storage = InMemoryStorage::<Invite>::new();
        let result = storage.update(test_invite(5)).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_modify_applies_closure() {
        let storage = InMemoryStorage::<Invite>::new();
        let invite = test_invite(2);
        let id = invite.id().clone();
        storage.create(invite).await.unwrap();

        let modified = storage
            .modify(
                &id,
                Box::new(|inv| {
                    inv.record_use();
                    Ok(())
                }),
            )
            .await
            .unwrap();

        assert_eq!(modified.uses_left(), 1);
        assert_eq!(storage.get(&id).await.unwrap().unwrap().uses_left(), 1);
    }

    #[tokio::test]
    async fn test_modify_error_leaves_state_unchanged() {
        let storage = InMemoryStorage::<Invite>::new();
        let invite = test_invite(2);
        let id = invite.id().clone();
        storage.create(invite).await.unwrap();

        let result = storage
            .modify(
                &id,
                Box::new(|_| Err(DomainError::invite_invalid("refused"))),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(storage.get(&id).await.unwrap().unwrap().uses_left(), 2);
    }

    #[tokio::test]
    async fn test_modify_missing_key() {
        let storage = InMemoryStorage::<Invite>::new();
        let orphan = test_invite(1);

        let result = storage.modify(orphan.id(), Box::new(|_| Ok(()))).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = InMemoryStorage::<Invite>::new();
        let invite = test_invite(5);
        let id = invite.id().clone();
        storage.create(invite).await.unwrap();

        assert!(storage.delete(&id).await.unwrap());
        assert!(!storage.delete(&id).await.unwrap());
        assert!(storage.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_with_entities() {
        let first = test_invite(1);
        let id = first.id().clone();
        let storage = InMemoryStorage::with_entities(vec![first, test_invite(2)]);

        assert_eq!(storage.count().await.unwrap(), 2);
        assert!(storage.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let storage = InMemoryStorage::<Invite>::new();
        storage.create(test_invite(1)).await.unwrap();
        storage.create(test_invite(2)).await.unwrap();

        assert_eq!(storage.list().await.unwrap().len(), 2);
        assert_eq!(storage.count().await.unwrap(), 2);

        storage.clear().await.unwrap();
        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
