//! # Personal List Repository
//!
//! Reads and writes the personal list under [`STORAGE_KEY`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ──► load() ──► get("myList") ──► Rehydrated::from_raw          │
//! │                                              │                          │
//! │                 ┌────────────────────────────┼──────────────────┐       │
//! │                 ▼                            ▼                  ▼       │
//! │             Restored(list)           VersionMismatch        Corrupt     │
//! │             use as-is                warn!, start empty     warn!, empty│
//! │                                                                         │
//! │  mutation ──► save(list) ──► set("myList", {"version":"1.0",...})       │
//! │                 └── Err bubbles to CatalogStore, which logs it          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use marquee_core::persist::{PersistedList, Rehydrated};
use marquee_core::{Movie, STORAGE_KEY, STORAGE_VERSION};
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::kv::KeyValueStore;

/// Personal list persistence over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PersonalListRepository<S> {
    store: S,
}

impl<S: KeyValueStore> PersonalListRepository<S> {
    /// Creates a repository over `store`.
    pub fn new(store: S) -> Self {
        PersonalListRepository { store }
    }

    /// Returns the underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads and classifies the stored record.
    pub async fn read(&self) -> DbResult<Rehydrated> {
        let raw = self.store.get(STORAGE_KEY).await?;
        Ok(Rehydrated::from_raw(raw.as_deref()))
    }

    /// Loads the personal list for startup.
    ///
    /// Never fails: a missing, foreign-version, corrupt, or unreadable record
    /// yields an empty list.
    pub async fn load(&self) -> Vec<Movie> {
        match self.read().await {
            Ok(Rehydrated::Restored(list)) => {
                debug!(count = list.len(), "Personal list restored");
                list
            }
            Ok(Rehydrated::Missing) => {
                debug!("No stored personal list");
                Vec::new()
            }
            Ok(Rehydrated::VersionMismatch { found }) => {
                warn!(
                    found = %found,
                    expected = STORAGE_VERSION,
                    "Stored personal list has a different schema version, starting empty"
                );
                Vec::new()
            }
            Ok(Rehydrated::Corrupt(reason)) => {
                warn!(reason = %reason, "Stored personal list is unreadable, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read personal list, starting empty");
                Vec::new()
            }
        }
    }

    /// Writes `list` as a current-version record.
    pub async fn save(&self, list: &[Movie]) -> DbResult<()> {
        let raw = PersistedList::encode(list)?;
        self.store.set(STORAGE_KEY, &raw).await?;
        debug!(count = list.len(), "Personal list saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
