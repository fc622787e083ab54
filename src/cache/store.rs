//! Cache Store Module
//!
//! Shared TTL cache: a `HashMap` behind a readers-writer lock, with lazy
//! expiry on read and substring-based bulk invalidation.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats, MAX_TTL};

// == Generation ==
/// Invalidation counters observed before a backend load.
///
/// Passed back to [`Cache::set_if_current`] so that a fill computed from data
/// read before a concurrent write cannot land after that write's
/// invalidation. Only invalidations in the filled key's namespace (the text
/// before its first `:`) and pattern invalidations count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pattern_epoch: u64,
    namespace: u64,
}

/// Returns the namespace of a key: `books` for `books:id:1`.
fn namespace(key: &str) -> &str {
    key.split_once(':').map_or(key, |(ns, _)| ns)
}

#[derive(Debug, Default)]
struct Generations {
    /// Bumped by every pattern invalidation, which may span namespaces
    pattern_epoch: u64,
    /// Bumped by single-key invalidations, present or not
    by_namespace: HashMap<String, u64>,
}

impl Generations {
    fn current(&self, key: &str) -> Generation {
        Generation {
            pattern_epoch: self.pattern_epoch,
            namespace: self.by_namespace.get(namespace(key)).copied().unwrap_or(0),
        }
    }

    fn bump_key(&mut self, key: &str) {
        *self
            .by_namespace
            .entry(namespace(key).to_string())
            .or_insert(0) += 1;
    }
}

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    generations: Generations,
}

// == Cache ==
/// Thread-safe key/value store with a single TTL for every entry.
///
/// There is no background sweeper: an expired entry is removed by the first
/// `get` that observes it, or by a matching invalidation.
#[derive(Debug)]
pub struct Cache<V> {
    /// Key-value storage and invalidation counters, under one lock
    inner: RwLock<Inner<V>>,
    /// TTL applied to every entry at insertion
    ttl: Duration,
    /// Performance statistics
    stats: StatsRecorder,
}

impl<V: Clone> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl`.
    ///
    /// TTLs above [`MAX_TTL`] are clamped.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                generations: Generations::default(),
            }),
            ttl: ttl.min(MAX_TTL),
            stats: StatsRecorder::default(),
        }
    }

    /// Creates an empty cache with a TTL given in whole seconds.
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        Self::new(Duration::from_secs(ttl_secs))
    }

    /// Returns the TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns a clone of the live value stored under `key`.
    ///
    /// An expired entry counts as a miss and is removed before returning.
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let inner = self.inner.read().await;
            match inner.entries.get(key) {
                None => {
                    self.stats.record_miss();
                    debug!(key, "Cache miss");
                    return None;
                }
                Some(entry) if !entry.is_expired() => {
                    self.stats.record_hit();
                    debug!(key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
            }
        }

        // Expired: retake the lock exclusively to remove it. A `set` may have
        // refreshed the key in between, so check again.
        let mut inner = self.inner.write().await;
        if let Some(entry) = inner.entries.get(key) {
            if !entry.is_expired() {
                self.stats.record_hit();
                debug!(key, "Cache hit after concurrent refresh");
                return Some(entry.value.clone());
            }
            inner.entries.remove(key);
            self.stats.record_expiration();
            debug!(key, "Removed expired cache entry");
        }

        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and resetting
    /// its expiry to now + TTL.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.ttl);
        let mut inner = self.inner.write().await;
        debug!(key = %key, "Cache set");
        inner.entries.insert(key, entry);
    }

    /// Returns the invalidation generation relevant to `key`.
    ///
    /// Take it before reading the data that will be cached.
    pub async fn generation(&self, key: &str) -> Generation {
        self.inner.read().await.generations.current(key)
    }

    // == Set If Current ==
    /// Stores `value` only if no invalidation affecting `key` happened since
    /// `generation` was taken. Returns whether the value was stored.
    pub async fn set_if_current(
        &self,
        key: impl Into<String>,
        value: V,
        generation: Generation,
    ) -> bool {
        let key = key.into();
        let mut inner = self.inner.write().await;
        if inner.generations.current(&key) != generation {
            debug!(key = %key, "Skipped cache fill raced by an invalidation");
            return false;
        }
        inner.entries.insert(key, CacheEntry::new(value, self.ttl));
        true
    }

    // == Invalidate ==
    /// Removes the entry for `key`. Absent keys are a no-op.
    pub async fn invalidate(&self, key: &str) {
        let mut inner = self.inner.write().await;
        inner.generations.bump_key(key);
        if inner.entries.remove(key).is_some() {
            self.stats.record_invalidations(1);
            debug!(key, "Invalidated cache entry");
        }
    }

    // == Invalidate Pattern ==
    /// Removes every entry whose key contains `pattern` anywhere.
    ///
    /// Matching is a plain substring test: not anchored, no wildcards. An
    /// empty pattern matches every key. Returns the number of entries removed.
    pub async fn invalidate_pattern(&self, pattern: &str) -> usize {
        let mut inner = self.inner.write().await;
        inner.generations.pattern_epoch += 1;
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.contains(pattern));
        let removed = before - inner.entries.len();

        self.stats.record_invalidations(removed);
        debug!(pattern, removed, "Invalidated cache entries by pattern");
        removed
    }

    // == Length ==
    /// Returns the number of entries held, including expired entries that
    /// no read has observed yet.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        self.stats.snapshot(total_entries)
    }
}
