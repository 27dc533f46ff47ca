//! # Persisted Personal List
//!
//! The on-disk shape of the personal list and the rules for reading it back.
//!
//! ## Record Format
//! ```text
//! key:   "myList"
//! value: {"version":"1.0","list":[{"id":"1","title":"X",...}, ...]}
//! ```
//!
//! ## Rehydration Rules
//! ```text
//! stored value ──► missing ─────────────► empty list
//!              ├─► unparseable JSON ────► empty list
//!              ├─► version != "1.0" ────► empty list
//!              └─► version == "1.0" ────► stored list, verbatim
//! ```
//!
//! Nothing here touches storage. The db crate moves strings in and out; this
//! module decides what those strings mean.

use serde::{Deserialize, Serialize};

use crate::types::Movie;
use crate::STORAGE_VERSION;

/// Versioned personal list record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedList {
    /// Schema version. Older builds wrote `schemaVersion`.
    #[serde(alias = "schemaVersion")]
    pub version: String,

    /// The personal list in display order.
    #[serde(default)]
    pub list: Vec<Movie>,
}

impl PersistedList {
    /// Wraps `list` with the current schema version.
    pub fn current(list: &[Movie]) -> Self {
        PersistedList {
            version: STORAGE_VERSION.to_string(),
            list: list.to_vec(),
        }
    }

    /// Serializes `list` as a current-version record.
    pub fn encode(list: &[Movie]) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Self::current(list))
    }

    /// Returns true if this record was written by the current schema.
    pub fn is_current(&self) -> bool {
        self.version == STORAGE_VERSION
    }
}

/// What reading the stored record produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Rehydrated {
    /// A current-version record.
    Restored(Vec<Movie>),
    /// Nothing stored under the key.
    Missing,
    /// A record from a different schema version. Discarded.
    VersionMismatch { found: String },
    /// The stored value is not a valid record. Discarded.
    Corrupt(String),
}

impl Rehydrated {
    /// Decodes a raw stored value.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Rehydrated::Missing;
        };

        match serde_json::from_str::<PersistedList>(raw) {
            Ok(record) if record.is_current() => Rehydrated::Restored(record.list),
            Ok(record) => Rehydrated::VersionMismatch {
                found: record.version,
            },
            Err(e) => Rehydrated::Corrupt(e.to_string()),
        }
    }

    /// The list to start with. Anything but a current record yields empty.
    pub fn into_list(self) -> Vec<Movie> {
        match self {
            Rehydrated::Restored(list) => list,
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, MovieId};

    fn movie(id: &str) -> Movie {
        Movie {
            id: MovieId::from(id),
            title: format!("Movie {}", id),
            description: "desc".to_string(),
            image: "https://img.example/poster.png".to_string(),
            rating: 3.5,
            category: Category::New,
        }
    }

    #[test]
    fn test_encode_writes_current_version() {
        let raw = PersistedList::encode(&[movie("1")]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["list"][0]["id"], "1");
    }

    #[test]
    fn test_rehydrate_restores_current_record() {
        let raw = PersistedList::encode(&[movie("1"), movie("2")]).unwrap();

        let restored = Rehydrated::from_raw(Some(&raw));

        assert_eq!(restored, Rehydrated::Restored(vec![movie("1"), movie("2")]));
    }

    #[test]
    fn test_rehydrate_missing_is_empty() {
        let restored = Rehydrated::from_raw(None);
        assert_eq!(restored, Rehydrated::Missing);
        assert!(restored.into_list().is_empty());
    }

    #[test]
    fn test_rehydrate_version_mismatch_is_empty() {
        let raw = r#"{"version":"0.9","list":[{"id":"1","title":"Old"}]}"#;

        let restored = Rehydrated::from_raw(Some(raw));

        assert_eq!(
            restored,
            Rehydrated::VersionMismatch {
                found: "0.9".to_string()
            }
        );
        assert!(restored.into_list().is_empty());
    }

    #[test]
    fn test_rehydrate_accepts_legacy_field_name() {
        let raw = r#"{"schemaVersion":"1.0","list":[{"id":4,"title":"Legacy"}]}"#;

        let list = Rehydrated::from_raw(Some(raw)).into_list();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id.as_str(), "4");
    }

    #[test]
    fn test_rehydrate_corrupt_is_empty() {
        let restored = Rehydrated::from_raw(Some("not json"));
        assert!(matches!(restored, Rehydrated::Corrupt(_)));
        assert!(restored.into_list().is_empty());

        // A bare array predates the versioned record.
        let restored = Rehydrated::from_raw(Some(r#"[{"id":"1","title":"X"}]"#));
        assert!(restored.into_list().is_empty());
    }

    #[test]
    fn test_restored_order_is_preserved() {
        let list = vec![movie("3"), movie("1"), movie("2")];
        let raw = PersistedList::encode(&list).unwrap();

        assert_eq!(Rehydrated::from_raw(Some(&raw)).into_list(), list);
    }
}
