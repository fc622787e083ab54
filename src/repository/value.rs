//! Payloads stored in the shared cache.
//!
//! One cache instance serves every entity kind, so its value type is a
//! tagged union. Each entity converts itself in and out of its own
//! variants; a payload of the wrong kind reads back as `None`.

use std::sync::Arc;

use crate::models::{Book, Entity, Reader};

/// A cached item or list result.
///
/// Lists are shared slices: every caller served from the cache gets the
/// same allocation, read-only.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Book(Book),
    Books(Arc<[Book]>),
    Reader(Reader),
    Readers(Arc<[Reader]>),
}

/// An entity that can be stored in and read back from [`CachedValue`].
pub trait Cacheable: Entity {
    fn into_item(self) -> CachedValue;

    fn into_list(records: Arc<[Self]>) -> CachedValue;

    fn from_item(value: CachedValue) -> Option<Self>;

    fn from_list(value: CachedValue) -> Option<Arc<[Self]>>;
}

impl Cacheable for Book {
    fn into_item(self) -> CachedValue {
        CachedValue::Book(self)
    }

    fn into_list(records: Arc<[Self]>) -> CachedValue {
        CachedValue::Books(records)
    }

    fn from_item(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Book(book) => Some(book),
            _ => None,
        }
    }

    fn from_list(value: CachedValue) -> Option<Arc<[Self]>> {
        match value {
            CachedValue::Books(books) => Some(books),
            _ => None,
        }
    }
}

impl Cacheable for Reader {
    fn into_item(self) -> CachedValue {
        CachedValue::Reader(self)
    }

    fn into_list(records: Arc<[Self]>) -> CachedValue {
        CachedValue::Readers(records)
    }

    fn from_item(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Reader(reader) => Some(reader),
            _ => None,
        }
    }

    fn from_list(value: CachedValue) -> Option<Arc<[Self]>> {
        match value {
            CachedValue::Readers(readers) => Some(readers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityId;

    #[test]
    fn test_item_roundtrip() {
        let book = Book::new("Dune", "", EntityId(1));
        assert_eq!(Book::from_item(book.clone().into_item()), Some(book));
    }

    #[test]
    fn test_wrong_kind_reads_as_none() {
        let reader = Reader::new("Ada", "Lovelace");
        assert_eq!(Book::from_item(reader.into_item()), None);

        let books: Arc<[Book]> = Arc::from(vec![Book::new("Dune", "", EntityId(1))]);
        assert!(Reader::from_list(Book::into_list(books.clone())).is_none());
        assert!(Book::from_item(Book::into_list(books)).is_none());
    }

    #[test]
    fn test_list_shares_allocation() {
        let books: Arc<[Book]> = Arc::from(vec![Book::new("Dune", "", EntityId(1))]);
        let cached = Book::into_list(Arc::clone(&books));
        let restored = Book::from_list(cached).unwrap();
        assert!(Arc::ptr_eq(&books, &restored));
    }
}
