//! Read-through repository over a backend and the shared cache.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::value::{CachedValue, Cacheable};
use crate::cache::{keys, Cache};
use crate::error::Result;
use crate::models::EntityId;
use crate::storage::Backend;

/// Read-through repository for entity `E` stored in backend `B`.
///
/// - **Reads**: check the cache under the list or item key; on a miss load
///   from the backend and populate the cache.
/// - **Writes**: persist to the backend, then invalidate the affected keys
///   before returning. Writes never fill the cache.
///
/// Backend errors are returned unchanged, and a failed write leaves the
/// cache untouched.
pub struct CachedRepository<E, B> {
    backend: Arc<B>,
    cache: Arc<Cache<CachedValue>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, B> Clone for CachedRepository<E, B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            cache: Arc::clone(&self.cache),
            _entity: PhantomData,
        }
    }
}

impl<E, B> CachedRepository<E, B>
where
    E: Cacheable,
    B: Backend<E>,
{
    /// Creates a repository sharing `cache` with every other repository.
    pub fn new(backend: Arc<B>, cache: Arc<Cache<CachedValue>>) -> Self {
        Self {
            backend,
            cache,
            _entity: PhantomData,
        }
    }

    /// Returns the wrapped backend.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn list_key() -> String {
        keys::list_key(E::KIND)
    }

    fn item_key(id: EntityId) -> String {
        keys::item_key(E::KIND, id)
    }

    // == Create ==
    /// Persists `entity`, assigning its identifier, then drops the cached list.
    pub async fn create(&self, entity: &mut E) -> Result<()> {
        self.backend.create(entity).await.inspect_err(|err| {
            warn!(entity = E::NAME, error = %err, "Create failed");
        })?;

        info!(entity = E::NAME, id = %entity.id(), "Created");
        self.cache.invalidate(&Self::list_key()).await;
        Ok(())
    }

    // == Find All ==
    /// Returns every record, from the cache when the list is live.
    ///
    /// The returned slice may be shared with other callers.
    pub async fn find_all(&self) -> Result<Arc<[E]>> {
        let key = Self::list_key();
        if let Some(records) = self.cache.get(&key).await.and_then(E::from_list) {
            debug!(entity = E::NAME, count = records.len(), "Returning cached list");
            return Ok(records);
        }

        let generation = self.cache.generation(&key).await;
        let records: Arc<[E]> = self
            .backend
            .find_all()
            .await
            .inspect_err(|err| warn!(entity = E::NAME, error = %err, "Find all failed"))?
            .into();

        debug!(entity = E::NAME, count = records.len(), "Loaded list from backend");
        self.cache
            .set_if_current(key, E::into_list(Arc::clone(&records)), generation)
            .await;
        Ok(records)
    }

    // == Find By Id ==
    /// Returns the record with `id`, from the cache when live.
    ///
    /// A not-found result is propagated and never cached.
    pub async fn find_by_id(&self, id: EntityId) -> Result<E> {
        let key = Self::item_key(id);
        if let Some(record) = self.cache.get(&key).await.and_then(E::from_item) {
            debug!(entity = E::NAME, %id, "Returning cached record");
            return Ok(record);
        }

        let generation = self.cache.generation(&key).await;
        let record = self.backend.find_by_id(id).await.inspect_err(|err| {
            debug!(entity = E::NAME, %id, error = %err, "Find by id failed");
        })?;

        debug!(entity = E::NAME, %id, "Loaded record from backend");
        self.cache
            .set_if_current(key, record.clone().into_item(), generation)
            .await;
        Ok(record)
    }

    // == Update ==
    /// Persists the full state of `entity`, then drops its item key and the
    /// list key.
    pub async fn update(&self, entity: &mut E) -> Result<()> {
        self.backend.save(entity).await.inspect_err(|err| {
            warn!(entity = E::NAME, id = %entity.id(), error = %err, "Update failed");
        })?;

        let id = entity.id();
        info!(entity = E::NAME, %id, "Updated");
        self.cache.invalidate(&Self::item_key(id)).await;
        self.cache.invalidate(&Self::list_key()).await;
        Ok(())
    }

    // == Modify ==
    /// Applies `change` to the stored record with `id` in one backend step,
    /// then drops its item key and the list key.
    ///
    /// `change` returns whether it altered the record. When it did not,
    /// nothing is written or invalidated. Returns that flag.
    pub async fn modify<F>(&self, id: EntityId, change: F) -> Result<bool>
    where
        F: FnOnce(&mut E) -> bool + Send,
    {
        let changed = self.backend.modify(id, change).await.inspect_err(|err| {
            warn!(entity = E::NAME, %id, error = %err, "Modify failed");
        })?;
        if !changed {
            debug!(entity = E::NAME, %id, "Modify left record unchanged");
            return Ok(false);
        }

        info!(entity = E::NAME, %id, "Modified");
        self.cache.invalidate(&Self::item_key(id)).await;
        self.cache.invalidate(&Self::list_key()).await;
        Ok(true)
    }

    // == Delete ==
    /// Removes the record with `id`, then drops its item key and the list key.
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        self.backend.delete(id).await.inspect_err(|err| {
            warn!(entity = E::NAME, %id, error = %err, "Delete failed");
        })?;

        info!(entity = E::NAME, %id, "Deleted");
        self.cache.invalidate(&Self::item_key(id)).await;
        self.cache.invalidate(&Self::list_key()).await;
        Ok(())
    }

    // == Delete All ==
    /// Removes every record, then drops every cache key of this kind.
    pub async fn delete_all(&self) -> Result<()> {
        self.backend.delete_all().await.inspect_err(|err| {
            warn!(entity = E::NAME, error = %err, "Delete all failed");
        })?;

        let removed = self
            .cache
            .invalidate_pattern(&keys::kind_prefix(E::KIND))
            .await;
        info!(entity = E::NAME, removed, "Deleted all");
        Ok(())
    }
}
