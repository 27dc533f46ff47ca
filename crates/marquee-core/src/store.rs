//! # Catalog State Store
//!
//! The authoritative in-memory state and the pure transition function that
//! mutates it.
//!
//! ## Transition Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    apply(&state, action) -> Transition                  │
//! │                                                                         │
//! │  Event                         Action                   Effect          │
//! │  ─────                         ──────                   ──────          │
//! │                                                                         │
//! │  fetch started ──────────────► BeginLoad ─────────────► loading=true   │
//! │  fetch ok ───────────────────► CatalogLoaded(list) ───► catalog=list   │
//! │  fetch failed ───────────────► LoadFailed(msg) ───────► error=msg      │
//! │                                                                         │
//! │  admin create ───────────────► MovieAdded(m) ─────────► catalog.push   │
//! │  admin edit ─────────────────► MovieUpdated(m) ───────► replace by id  │
//! │  admin delete ───────────────► MovieDeleted(id) ──────► retain != id   │
//! │                                                                         │
//! │  "+ My List" ────────────────► PersonalListItemAdded ─► push  ⟶ persist │
//! │  "Remove" ───────────────────► PersonalListItemRemoved► retain ⟶ persist│
//! │  restore ────────────────────► PersonalListReplaced ──► swap  ⟶ persist │
//! │                                                                         │
//! │  NOTE: apply() never performs I/O. `Transition::persist` tells the      │
//! │        caller to write the personal list to durable storage.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Category, Movie, MovieId};
use crate::MAX_LIST_SIZE;

// =============================================================================
// State
// =============================================================================

/// Snapshot of everything the presentation layer reads.
///
/// ## Invariants
/// - `personal_list` never holds more than [`MAX_LIST_SIZE`] movies
/// - a movie id appears at most once in `personal_list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Catalog in server response order.
    pub catalog: Vec<Movie>,

    /// The user's bounded personal list.
    pub personal_list: Vec<Movie>,

    /// A catalog fetch is in flight.
    pub loading: bool,

    /// Message of the last failed catalog fetch.
    pub error: Option<String>,
}

impl StoreState {
    /// Initial state with a rehydrated personal list and an empty catalog.
    pub fn with_personal_list(personal_list: Vec<Movie>) -> Self {
        StoreState {
            personal_list,
            ..StoreState::default()
        }
    }

    /// Finds a catalog movie by id.
    pub fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.catalog.iter().find(|m| &m.id == id)
    }

    /// Catalog movies in the given category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Movie> {
        self.catalog.iter().filter(move |m| m.category == category)
    }

    /// Returns true if the personal list contains `id`.
    pub fn in_personal_list(&self, id: &MovieId) -> bool {
        self.personal_list.iter().any(|m| &m.id == id)
    }

    /// Returns true if the personal list cannot accept another movie.
    pub fn personal_list_full(&self) -> bool {
        self.personal_list.len() >= MAX_LIST_SIZE
    }

    /// Slots left in the personal list.
    pub fn remaining_capacity(&self) -> usize {
        MAX_LIST_SIZE.saturating_sub(self.personal_list.len())
    }
}

// =============================================================================
// Actions
// =============================================================================

/// The only ways to change a [`StoreState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A catalog fetch started.
    BeginLoad,
    /// A catalog fetch succeeded. Replaces the catalog wholesale.
    CatalogLoaded(Vec<Movie>),
    /// A catalog fetch failed.
    LoadFailed(String),
    /// The remote service created a movie. No uniqueness check.
    MovieAdded(Movie),
    /// The remote service replaced a movie.
    MovieUpdated(Movie),
    /// The remote service deleted a movie.
    MovieDeleted(MovieId),
    /// Add a movie to the personal list (capacity and duplicate checked).
    PersonalListItemAdded(Movie),
    /// Remove a movie from the personal list.
    PersonalListItemRemoved(MovieId),
    /// Replace the personal list wholesale (bulk restore).
    PersonalListReplaced(Vec<Movie>),
}

impl Action {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::BeginLoad => "begin_load",
            Action::CatalogLoaded(_) => "catalog_loaded",
            Action::LoadFailed(_) => "load_failed",
            Action::MovieAdded(_) => "movie_added",
            Action::MovieUpdated(_) => "movie_updated",
            Action::MovieDeleted(_) => "movie_deleted",
            Action::PersonalListItemAdded(_) => "personal_list_item_added",
            Action::PersonalListItemRemoved(_) => "personal_list_item_removed",
            Action::PersonalListReplaced(_) => "personal_list_replaced",
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Why an add to the personal list was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListRejection {
    /// The list already holds `max` movies.
    Full { max: usize },
    /// The movie is already in the list.
    Duplicate { id: MovieId },
}

impl std::fmt::Display for ListRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListRejection::Full { max } => write!(f, "list full ({max} movies max)"),
            ListRejection::Duplicate { id } => write!(f, "movie {id} is already in the list"),
        }
    }
}

/// Classified result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The state changed.
    Applied,
    /// Nothing matched (update/delete/remove of an absent id).
    Unchanged,
    /// A personal-list add was refused. State is untouched.
    Rejected { reason: ListRejection },
}

impl Outcome {
    /// Returns the rejection, if any.
    pub fn rejection(&self) -> Option<&ListRejection> {
        match self {
            Outcome::Rejected { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Result of [`apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The new state snapshot.
    pub state: StoreState,
    /// What happened.
    pub outcome: Outcome,
    /// The caller must write `state.personal_list` to durable storage.
    pub persist: bool,
}

impl Transition {
    fn applied(state: StoreState) -> Self {
        Transition {
            state,
            outcome: Outcome::Applied,
            persist: false,
        }
    }

    fn persisted(state: StoreState, outcome: Outcome) -> Self {
        Transition {
            state,
            outcome,
            persist: true,
        }
    }
}

// =============================================================================
// Transition Function
// =============================================================================

/// Applies `action` to `state`, returning the next snapshot.
///
/// Total and deterministic: defined for every state, never panics, never
/// performs I/O. Rejected personal-list adds return an unchanged snapshot
/// and `persist == false`.
///
/// ## Example
/// ```rust
/// use marquee_core::store::{apply, Action, Outcome, StoreState};
/// use marquee_core::{Category, Movie, MovieId};
///
/// let movie = Movie {
///     id: MovieId::from("1"),
///     title: "X".into(),
///     description: String::new(),
///     image: String::new(),
///     rating: 4.0,
///     category: Category::Trending,
/// };
///
/// let t = apply(&StoreState::default(), Action::PersonalListItemAdded(movie.clone()));
/// assert_eq!(t.outcome, Outcome::Applied);
/// assert!(t.persist);
///
/// let again = apply(&t.state, Action::PersonalListItemAdded(movie));
/// assert!(again.outcome.rejection().is_some());
/// assert!(!again.persist);
/// ```
pub fn apply(state: &StoreState, action: Action) -> Transition {
    let mut next = state.clone();

    match action {
        Action::BeginLoad => {
            next.loading = true;
            Transition::applied(next)
        }

        Action::CatalogLoaded(movies) => {
            next.catalog = movies;
            next.loading = false;
            next.error = None;
            Transition::applied(next)
        }

        Action::LoadFailed(message) => {
            next.error = Some(message);
            next.loading = false;
            Transition::applied(next)
        }

        Action::MovieAdded(movie) => {
            next.catalog.push(movie);
            Transition::applied(next)
        }

        Action::MovieUpdated(movie) => match next.catalog.iter_mut().find(|m| m.id == movie.id) {
            Some(slot) => {
                *slot = movie;
                Transition::applied(next)
            }
            None => Transition {
                outcome: Outcome::Unchanged,
                ..Transition::applied(next)
            },
        },

        Action::MovieDeleted(id) => {
            let before = next.catalog.len();
            next.catalog.retain(|m| m.id != id);
            let outcome = if next.catalog.len() == before {
                Outcome::Unchanged
            } else {
                Outcome::Applied
            };
            Transition {
                outcome,
                ..Transition::applied(next)
            }
        }

        Action::PersonalListItemAdded(movie) => {
            // Capacity first, then duplicates: a full list reports "full" even
            // for a movie it already holds.
            if next.personal_list.len() >= MAX_LIST_SIZE {
                return rejected(next, ListRejection::Full { max: MAX_LIST_SIZE });
            }
            if next.in_personal_list(&movie.id) {
                return rejected(next, ListRejection::Duplicate { id: movie.id });
            }
            next.personal_list.push(movie);
            Transition::persisted(next, Outcome::Applied)
        }

        Action::PersonalListItemRemoved(id) => {
            let before = next.personal_list.len();
            next.personal_list.retain(|m| m.id != id);
            let outcome = if next.personal_list.len() == before {
                Outcome::Unchanged
            } else {
                Outcome::Applied
            };
            // Persisted even when nothing matched.
            Transition::persisted(next, outcome)
        }

        Action::PersonalListReplaced(movies) => {
            next.personal_list = movies;
            Transition::persisted(next, Outcome::Applied)
        }
    }
}

fn rejected(state: StoreState, reason: ListRejection) -> Transition {
    Transition {
        state,
        outcome: Outcome::Rejected { reason },
        persist: false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
