//! Reading-list operations on the reader repository.

use tracing::debug;

use super::cached::CachedRepository;
use crate::error::Result;
use crate::models::{EntityId, Reader};
use crate::storage::Backend;

impl<B> CachedRepository<Reader, B>
where
    B: Backend<Reader>,
{
    /// Adds `book_id` to the reader's currently-reading list.
    ///
    /// The change is applied by the backend in one step, so concurrent
    /// additions to the same reader are all kept. Adding a book already on
    /// the list is a no-op.
    pub async fn add_currently_reading(&self, reader_id: EntityId, book_id: EntityId) -> Result<()> {
        let changed = self
            .modify(reader_id, move |reader| reader.start_reading(book_id))
            .await?;
        if !changed {
            debug!(%reader_id, %book_id, "Book already on reading list");
        }
        Ok(())
    }

    /// Removes `book_id` from the reader's currently-reading list.
    ///
    /// Removing a book that is not on the list is a no-op.
    pub async fn remove_currently_reading(
        &self,
        reader_id: EntityId,
        book_id: EntityId,
    ) -> Result<()> {
        let changed = self
            .modify(reader_id, move |reader| reader.stop_reading(book_id))
            .await?;
        if !changed {
            debug!(%reader_id, %book_id, "Book not on reading list");
        }
        Ok(())
    }
}
