//! In-memory backend for development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Backend;
use crate::error::{RepositoryError, Result};
use crate::models::{Entity, EntityId};

#[derive(Debug)]
struct Table<E> {
    rows: BTreeMap<EntityId, E>,
    next_id: u64,
}

impl<E: Entity> Table<E> {
    fn insert_new(&mut self, entity: &mut E) -> Result<()> {
        let meta = entity.meta_mut();
        if meta.id.is_assigned() {
            if self.rows.contains_key(&meta.id) {
                return Err(RepositoryError::Constraint(format!(
                    "{} {} already exists",
                    E::NAME,
                    meta.id
                )));
            }
            self.next_id = self.next_id.max(meta.id.0 + 1);
        } else {
            meta.id = EntityId(self.next_id);
            self.next_id += 1;
        }

        let id = meta.id;
        let now = Utc::now();
        meta.created_at = now;
        meta.updated_at = now;
        self.rows.insert(id, entity.clone());
        Ok(())
    }
}

/// Backend keeping records in a `BTreeMap` behind an async lock.
///
/// Identifiers are assigned from 1 upwards and never reused, even after
/// `delete_all`. Data lives as long as the backend.
#[derive(Debug)]
pub struct InMemoryBackend<E> {
    table: RwLock<Table<E>>,
}

impl<E: Entity> InMemoryBackend<E> {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

impl<E: Entity> Default for InMemoryBackend<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Backend<E> for InMemoryBackend<E> {
    async fn create(&self, entity: &mut E) -> Result<()> {
        self.table.write().await.insert_new(entity)
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<E> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                entity: E::NAME,
                id,
            })
    }

    async fn save(&self, entity: &mut E) -> Result<()> {
        let mut table = self.table.write().await;
        let id = entity.id();
        if !id.is_assigned() || !table.rows.contains_key(&id) {
            return table.insert_new(entity);
        }

        entity.meta_mut().updated_at = Utc::now();
        table.rows.insert(id, entity.clone());
        Ok(())
    }

    async fn modify<F>(&self, id: EntityId, change: F) -> Result<bool>
    where
        F: FnOnce(&mut E) -> bool + Send,
    {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(RepositoryError::NotFound {
            entity: E::NAME,
            id,
        })?;
        if !change(row) {
            return Ok(false);
        }
        row.meta_mut().updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.table.write().await.rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Reader};

    fn book(title: &str) -> Book {
        Book::new(title, "", EntityId(1))
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        let mut first = book("first");
        let mut second = book("second");

        backend.create(&mut first).await.unwrap();
        backend.create(&mut second).await.unwrap();

        assert_eq!(first.id(), EntityId(1));
        assert_eq!(second.id(), EntityId(2));
        assert_eq!(backend.len().await, 2);
    }

    #[tokio::test]
    async fn test_create_with_taken_id_fails() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        let mut original = book("original");
        backend.create(&mut original).await.unwrap();

        let mut duplicate = book("duplicate");
        duplicate.meta.id = original.id();
        let err = backend.create(&mut duplicate).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Constraint(_)));
        assert_eq!(backend.find_by_id(original.id()).await.unwrap().title, "original");
    }

    #[tokio::test]
    async fn test_create_with_explicit_id_advances_sequence() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        let mut explicit = book("explicit");
        explicit.meta.id = EntityId(10);
        backend.create(&mut explicit).await.unwrap();

        let mut next = book("next");
        backend.create(&mut next).await.unwrap();
        assert_eq!(next.id(), EntityId(11));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let backend: InMemoryBackend<Reader> = InMemoryBackend::new();

        let err = backend.find_by_id(EntityId(5)).await.unwrap_err();
        assert_eq!(
            err,
            RepositoryError::NotFound {
                entity: "Reader",
                id: EntityId(5)
            }
        );
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        for title in ["a", "b", "c"] {
            backend.create(&mut book(title)).await.unwrap();
        }

        let titles: Vec<_> = backend
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_save_updates_and_stamps() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        let mut stored = book("draft");
        backend.create(&mut stored).await.unwrap();
        let created_at = stored.meta.created_at;

        stored.title = "final".to_string();
        backend.save(&mut stored).await.unwrap();

        let loaded = backend.find_by_id(stored.id()).await.unwrap();
        assert_eq!(loaded.title, "final");
        assert_eq!(loaded.meta.created_at, created_at);
        assert!(loaded.meta.updated_at >= created_at);
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_unsaved_inserts() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        let mut fresh = book("fresh");

        backend.save(&mut fresh).await.unwrap();

        assert!(fresh.id().is_assigned());
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_modify_applies_in_place() {
        let backend: InMemoryBackend<Reader> = InMemoryBackend::new();
        let mut ada = Reader::new("Ada", "Lovelace");
        backend.create(&mut ada).await.unwrap();

        assert!(backend.modify(ada.id(), |r| r.start_reading(EntityId(4))).await.unwrap());
        assert!(!backend.modify(ada.id(), |r| r.start_reading(EntityId(4))).await.unwrap());

        let stored = backend.find_by_id(ada.id()).await.unwrap();
        assert_eq!(stored.currently_reading, vec![EntityId(4)]);
        assert!(stored.meta.updated_at >= stored.meta.created_at);

        let err = backend.modify(EntityId(99), |_| true).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let backend: InMemoryBackend<Book> = InMemoryBackend::new();
        let mut kept = book("kept");
        let mut gone = book("gone");
        backend.create(&mut kept).await.unwrap();
        backend.create(&mut gone).await.unwrap();

        backend.delete(gone.id()).await.unwrap();
        // Absent ids are not an error
        backend.delete(gone.id()).await.unwrap();
        assert_eq!(backend.len().await, 1);

        backend.delete_all().await.unwrap();
        assert!(backend.is_empty().await);

        let mut after = book("after");
        backend.create(&mut after).await.unwrap();
        assert_eq!(after.id(), EntityId(3));
    }
}
