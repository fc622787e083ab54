//! Application state
//!
//! Composition root: one cache built from `Config`, shared by every
//! repository. Callers go through the repositories and never see the cache.

use std::sync::Arc;

use tracing::info;

use crate::cache::{Cache, CacheStats};
use crate::config::Config;
use crate::repository::{BookRepository, CachedValue, ReaderRepository};
use crate::storage::InMemoryBackend;

/// Repositories sharing one cache instance for the life of the process.
#[derive(Clone)]
pub struct AppState {
    cache: Arc<Cache<CachedValue>>,
    /// Book repository
    pub books: BookRepository,
    /// Reader repository
    pub readers: ReaderRepository,
}

impl AppState {
    /// Creates an AppState around `cache` with in-memory backends.
    pub fn new(cache: Cache<CachedValue>) -> Self {
        let cache = Arc::new(cache);
        Self {
            books: BookRepository::new(Arc::new(InMemoryBackend::new()), Arc::clone(&cache)),
            readers: ReaderRepository::new(Arc::new(InMemoryBackend::new()), Arc::clone(&cache)),
            cache,
        }
    }

    /// Creates an AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let state = Self::new(Cache::new(config.cache_ttl()));
        info!(
            "Cache initialized: ttl={}s",
            state.cache.ttl().as_secs()
        );
        state
    }

    /// Returns a snapshot of the shared cache counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
