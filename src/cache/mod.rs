//! Cache Module
//!
//! Provides the shared in-memory cache with a global TTL, lazy expiry and
//! substring-pattern invalidation.

mod entry;
pub mod keys;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{Cache, Generation};

// == Public Constants ==
/// Upper bound on the cache TTL (ten years)
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);
