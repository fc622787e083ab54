//! Backend storage contract.
//!
//! A backend is the source of truth for one entity type: a transactional
//! store reached through plain CRUD calls. The read-through repositories
//! wrap it and never look inside.

mod inmemory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Entity, EntityId};

pub use inmemory::InMemoryBackend;

/// CRUD operations offered by a persistence backend for entity `E`.
#[async_trait]
pub trait Backend<E: Entity>: Send + Sync {
    /// Inserts `entity`, assigning its identifier and timestamps in place.
    async fn create(&self, entity: &mut E) -> Result<()>;

    /// Returns every record, ordered by identifier.
    async fn find_all(&self) -> Result<Vec<E>>;

    /// Returns the record with `id`, or `RepositoryError::NotFound`.
    async fn find_by_id(&self, id: EntityId) -> Result<E>;

    /// Persists the full state of `entity`, inserting it if unknown.
    async fn save(&self, entity: &mut E) -> Result<()>;

    /// Applies `change` to the stored record with `id` as one atomic step,
    /// stamping it when `change` reports an alteration.
    ///
    /// Returns whether the record changed, or `RepositoryError::NotFound`.
    async fn modify<F>(&self, id: EntityId, change: F) -> Result<bool>
    where
        F: FnOnce(&mut E) -> bool + Send;

    /// Removes the record with `id`. Removing an absent record succeeds.
    async fn delete(&self, id: EntityId) -> Result<()>;

    /// Removes every record.
    async fn delete_all(&self) -> Result<()>;
}
