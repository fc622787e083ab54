//! Record metadata shared by every persisted entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned record identifier. Zero means "not yet persisted".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    pub const UNASSIGNED: EntityId = EntityId(0);

    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier and bookkeeping timestamps, maintained by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Metadata for a record that has not been persisted yet.
    pub fn unsaved() -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::UNASSIGNED,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::unsaved()
    }
}

/// A record type stored by a backend and cached under its own key namespace.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Cache key namespace, e.g. `books`.
    const KIND: &'static str;
    /// Human-readable name used in errors, e.g. `Book`.
    const NAME: &'static str;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> EntityId {
        self.meta().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_id() {
        assert!(!EntityId::UNASSIGNED.is_assigned());
        assert!(EntityId(1).is_assigned());
        assert_eq!(RecordMeta::unsaved().id, EntityId::UNASSIGNED);
    }

    #[test]
    fn test_id_display_and_serde() {
        assert_eq!(EntityId(42).to_string(), "42");
        assert_eq!(serde_json::to_string(&EntityId(42)).unwrap(), "42");
        let id: EntityId = serde_json::from_str("7").unwrap();
        assert_eq!(id, EntityId::from(7));
    }
}
