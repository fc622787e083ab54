//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored payload together with the instant it stops being served.
///
/// The payload is opaque to the cache: it is cloned out on reads and
/// replaced wholesale on writes, never inspected.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic instant at which the entry expires
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::inserted_at(value, Instant::now(), ttl)
    }

    /// Creates an entry as if it had been inserted at `inserted_at`.
    pub fn inserted_at(value: V, inserted_at: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: inserted_at + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant is greater than or equal
    /// to its expiration instant, so a zero TTL is expired immediately.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the time left before expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
