//! Book entity.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, RecordMeta};

/// A catalog entry owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub description: String,
    /// Owner of the book
    pub user_id: EntityId,
}

impl Book {
    /// Creates an unsaved book.
    pub fn new(title: impl Into<String>, description: impl Into<String>, user_id: EntityId) -> Self {
        Self {
            meta: RecordMeta::unsaved(),
            title: title.into(),
            description: description.into(),
            user_id,
        }
    }
}

impl Entity for Book {
    const KIND: &'static str = "books";
    const NAME: &'static str = "Book";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}
