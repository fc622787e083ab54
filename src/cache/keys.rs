//! Cache key construction.
//!
//! Every entity kind owns a namespace `"{kind}:"` holding one list key and
//! one item key per identifier. The cache itself treats keys as opaque.

use std::fmt::Display;

/// Returns the key for the full collection of a kind, e.g. `books:all`.
pub fn list_key(kind: &str) -> String {
    format!("{}:all", kind)
}

/// Returns the key for a single record, e.g. `books:id:42`.
pub fn item_key(kind: &str, id: impl Display) -> String {
    format!("{}:id:{}", kind, id)
}

/// Returns the substring shared by every key of a kind, e.g. `books:`.
pub fn kind_prefix(kind: &str) -> String {
    format!("{}:", kind)
}
