//! Read-through repositories
//!
//! One generic implementation of the read-through pattern, instantiated for
//! books and readers over a single shared cache.
//!
//! Keys per kind: `{kind}:all` for the list, `{kind}:id:{id}` per record.

mod cached;
mod reader;
mod value;

pub use cached::CachedRepository;
pub use value::{CachedValue, Cacheable};

use crate::models::{Book, Reader};
use crate::storage::InMemoryBackend;

/// Book repository, backed in memory unless another backend is named.
pub type BookRepository<B = InMemoryBackend<Book>> = CachedRepository<Book, B>;

/// Reader repository, backed in memory unless another backend is named.
pub type ReaderRepository<B = InMemoryBackend<Reader>> = CachedRepository<Reader, B>;
