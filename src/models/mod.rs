//! Domain models
//!
//! Entities stored by the backends and cached by the repositories, plus the
//! request payloads used to create and update them.

pub mod book;
pub mod entity;
pub mod reader;
pub mod requests;

// Re-export commonly used types
pub use book::Book;
pub use entity::{Entity, EntityId, RecordMeta};
pub use reader::Reader;
pub use requests::{BookUpdate, NewBook, NewReader, ReaderUpdate};
