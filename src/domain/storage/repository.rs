//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Closure applied to an entity inside [`Storage::modify`]
pub type ModifyFn<E> = Box<dyn FnOnce(&mut E) -> Result<(), DomainError> + Send>;

/// Generic storage trait for CRUD operations on any entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity, returns error if not found
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Applies a closure to the stored entity and persists the result.
    ///
    /// Returns the entity after modification. If the closure fails, nothing
    /// is persisted. Backends that can hold a write lock for the whole
    /// read-modify-write cycle must override this; the default is a plain
    /// get-then-update and is not safe against concurrent modification.
    async fn modify(&self, key: &E::Key, f: ModifyFn<E>) -> Result<E, DomainError> {
        let mut entity = self.get(key).await?.ok_or_else(|| {
            DomainError::not_found(format!("Entity with key '{}' not found", key.as_str()))
        })?;

        f(&mut entity)?;
        self.update(entity).await
    }

    /// Deletes an entity by its key, returns true if deleted
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }

    /// Clears all entities (use with caution)
    async fn clear(&self) -> Result<(), DomainError>;
}
