//! # Catalog Store
//!
//! Owns the current [`StoreState`] and serializes every transition.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CatalogStore::dispatch(action)                       │
//! │                                                                         │
//! │  lock ──► apply(state, action) ──► commit snapshot ──► notify watchers  │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                   transition.persist?                   │
//! │                                     │          │                        │
//! │                                    no         yes                       │
//! │                                     │          ▼                        │
//! │                                     │   save(personal_list)             │
//! │                                     │     └── Err ──► warn!, continue   │
//! │                                     ▼                                   │
//! │                                  unlock, return Outcome                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The lock is a `tokio::sync::Mutex` held until the write finishes, so
//! durable writes land in dispatch order and the stored list always matches
//! some committed snapshot. Readers never take the lock: they read the
//! latest snapshot from the `watch` channel.

use std::sync::Arc;

use marquee_core::{apply, Action, Outcome, StoreState, Transition};
use marquee_db::{KeyValueStore, PersonalListRepository};
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

/// Application state container for the catalog and the personal list.
#[derive(Debug)]
pub struct CatalogStore<S> {
    state: Mutex<Arc<StoreState>>,
    snapshots: watch::Sender<Arc<StoreState>>,
    lists: PersonalListRepository<S>,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Rehydrates the personal list from `lists` and starts with an empty
    /// catalog.
    pub async fn open(lists: PersonalListRepository<S>) -> Self {
        let personal_list = lists.load().await;
        Self::with_state(lists, StoreState::with_personal_list(personal_list))
    }

    /// Starts from an explicit state. Nothing is read from storage.
    pub fn with_state(lists: PersonalListRepository<S>, state: StoreState) -> Self {
        let state = Arc::new(state);
        let (snapshots, _) = watch::channel(Arc::clone(&state));

        CatalogStore {
            state: Mutex::new(state),
            snapshots,
            lists,
        }
    }

    /// Applies `action`, publishes the new snapshot, and writes the personal
    /// list when the transition asks for it.
    ///
    /// A failed write is logged and otherwise ignored: the in-memory state
    /// stays committed.
    pub async fn dispatch(&self, action: Action) -> Outcome {
        let name = action.name();
        let mut current = self.state.lock().await;

        let Transition {
            state,
            outcome,
            persist,
        } = apply(&current, action);

        let next = Arc::new(state);
        *current = Arc::clone(&next);
        self.snapshots.send_replace(Arc::clone(&next));
        debug!(action = name, outcome = ?outcome, "Action applied");

        if persist {
            if let Err(e) = self.lists.save(&next.personal_list).await {
                warn!(action = name, error = %e, "Failed to persist personal list");
            }
        }

        outcome
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Arc<StoreState> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreState>> {
        self.snapshots.subscribe()
    }
}
