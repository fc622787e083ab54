//! Reader entity.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, RecordMeta};

/// A library member and the books they are currently reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub currently_reading: Vec<EntityId>,
}

impl Reader {
    /// Creates an unsaved reader with an empty reading list.
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::unsaved(),
            name: name.into(),
            surname: surname.into(),
            currently_reading: Vec::new(),
        }
    }

    /// Adds a book to the reading list. Returns false if it was already there.
    pub fn start_reading(&mut self, book_id: EntityId) -> bool {
        if self.currently_reading.contains(&book_id) {
            return false;
        }
        self.currently_reading.push(book_id);
        true
    }

    /// Removes a book from the reading list. Returns false if it was absent.
    pub fn stop_reading(&mut self, book_id: EntityId) -> bool {
        let before = self.currently_reading.len();
        self.currently_reading.retain(|id| *id != book_id);
        self.currently_reading.len() != before
    }
}

impl Entity for Reader {
    const KIND: &'static str = "readers";
    const NAME: &'static str = "Reader";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_list() {
        let mut reader = Reader::new("Ada", "Lovelace");

        assert!(reader.start_reading(EntityId(3)));
        assert!(!reader.start_reading(EntityId(3)));
        assert_eq!(reader.currently_reading, vec![EntityId(3)]);

        assert!(reader.stop_reading(EntityId(3)));
        assert!(!reader.stop_reading(EntityId(3)));
        assert!(reader.currently_reading.is_empty());
    }
}
