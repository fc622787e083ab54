//! Library Cache - read-through TTL caching for a library catalog
//!
//! A shared in-memory cache with lazy expiry and substring invalidation,
//! and read-through repositories for books and readers built on it.
//!
//! # Startup
//!
//! An embedding service installs logging, loads its configuration and builds
//! the shared state once:
//!
//! ```no_run
//! use library_cache::models::{Book, Entity, EntityId};
//! use library_cache::{logging, AppState, Config};
//!
//! # async fn run() -> library_cache::Result<()> {
//! logging::init_tracing();
//! let config = Config::load_or_default("config.json");
//! let state = AppState::from_config(&config);
//!
//! let mut book = Book::new("Dune", "Desert planet", EntityId(1));
//! state.books.create(&mut book).await?;
//! let cached = state.books.find_by_id(book.id()).await?;
//! assert_eq!(cached.title, "Dune");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod state;
pub mod storage;

pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{RepositoryError, Result};
pub use repository::{BookRepository, CachedRepository, CachedValue, ReaderRepository};
pub use state::AppState;
pub use storage::{Backend, InMemoryBackend};
