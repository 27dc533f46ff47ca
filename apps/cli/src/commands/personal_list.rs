//! # Personal List Commands
//!
//! The user's bounded "my list" of up to ten movies.
//!
//! ## Outcomes, Not Errors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_to_list(id)                                                        │
//! │      │                                                                  │
//! │      ├── id not in catalog ──────────► Err(NOT_FOUND)                   │
//! │      │                                                                  │
//! │      └── dispatch(PersonalListItemAdded)                                │
//! │              ├── Applied ────────────► list persisted                   │
//! │              ├── Rejected(Full) ─────► notice "list full (10 ...)"      │
//! │              └── Rejected(Duplicate) ► notice, list unchanged           │
//! │                                                                         │
//! │  Rejections come back as Ok(ListChange) carrying a notice.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::path::Path;

use marquee_core::{
    Action, CoreError, Movie, MovieId, Outcome, PersistedList, StoreState, MAX_LIST_SIZE,
};
use marquee_db::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::state::CatalogStore;

/// The personal list plus the counters the UI shows (`3/10`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub items: Vec<Movie>,
    pub count: usize,
    pub capacity: usize,
    pub remaining: usize,
    pub full: bool,
}

impl From<&StoreState> for ListView {
    fn from(state: &StoreState) -> Self {
        ListView {
            items: state.personal_list.clone(),
            count: state.personal_list.len(),
            capacity: MAX_LIST_SIZE,
            remaining: state.remaining_capacity(),
            full: state.personal_list_full(),
        }
    }
}

/// Result of a list mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChange {
    pub outcome: Outcome,

    /// Human-readable rejection reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,

    pub list: ListView,
}

impl ListChange {
    fn new(outcome: Outcome, state: &StoreState) -> Self {
        let notice = outcome.rejection().map(ToString::to_string);
        ListChange {
            outcome,
            notice,
            list: ListView::from(state),
        }
    }
}

/// File accepted by [`import_list`]: an exported record or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Record(PersistedList),
    Bare(Vec<Movie>),
}

/// Current personal list.
pub fn show_list<S: KeyValueStore>(store: &CatalogStore<S>) -> ListView {
    ListView::from(store.snapshot().as_ref())
}

/// Adds catalog movie `id` to the personal list.
///
/// The catalog must be loaded; the stored copy is the catalog entry at the
/// time of adding.
pub async fn add_to_list<S: KeyValueStore>(
    store: &CatalogStore<S>,
    id: &MovieId,
) -> AppResult<ListChange> {
    debug!(id = %id, "add_to_list command");

    let movie = store
        .snapshot()
        .find(id)
        .cloned()
        .ok_or_else(|| CoreError::MovieNotFound(id.to_string()))?;

    let outcome = store.dispatch(Action::PersonalListItemAdded(movie)).await;
    match outcome.rejection() {
        Some(reason) => info!(id = %id, reason = %reason, "Personal list add rejected"),
        None => info!(id = %id, "Added to personal list"),
    }

    Ok(ListChange::new(outcome, &store.snapshot()))
}

/// Removes `id` from the personal list. Absent ids are not an error.
pub async fn remove_from_list<S: KeyValueStore>(
    store: &CatalogStore<S>,
    id: &MovieId,
) -> ListChange {
    debug!(id = %id, "remove_from_list command");
    let outcome = store.dispatch(Action::PersonalListItemRemoved(id.clone())).await;
    ListChange::new(outcome, &store.snapshot())
}

/// Replaces the whole personal list.
///
/// ## Errors
/// A list longer than the capacity or with a repeated id is refused before
/// the store sees it.
pub async fn replace_list<S: KeyValueStore>(
    store: &CatalogStore<S>,
    list: Vec<Movie>,
) -> AppResult<ListChange> {
    debug!(count = list.len(), "replace_list command");

    if list.len() > MAX_LIST_SIZE {
        return Err(AppError::validation(format!(
            "Personal list cannot have more than {} movies (got {})",
            MAX_LIST_SIZE,
            list.len()
        )));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = list.iter().find(|m| !seen.insert(m.id.clone())) {
        return Err(AppError::validation(format!(
            "Movie {} appears more than once",
            dup.id
        )));
    }

    let outcome = store.dispatch(Action::PersonalListReplaced(list)).await;
    Ok(ListChange::new(outcome, &store.snapshot()))
}

/// Empties the personal list.
pub async fn clear_list<S: KeyValueStore>(store: &CatalogStore<S>) -> AppResult<ListChange> {
    replace_list(store, Vec::new()).await
}

/// Current personal list wrapped as a versioned record.
pub fn export_list<S: KeyValueStore>(store: &CatalogStore<S>) -> PersistedList {
    PersistedList::current(&store.snapshot().personal_list)
}

/// Parses an import file.
///
/// Accepts the output of [`export_list`] or a plain JSON array of movies.
/// A record from another schema version is refused.
pub fn parse_import(text: &str) -> AppResult<Vec<Movie>> {
    let file: ImportFile = serde_json::from_str(text)
        .map_err(|e| AppError::validation(format!("Not a personal list file: {}", e)))?;

    match file {
        ImportFile::Record(record) if record.is_current() => Ok(record.list),
        ImportFile::Record(record) => Err(AppError::validation(format!(
            "Unsupported personal list version {}",
            record.version
        ))),
        ImportFile::Bare(list) => Ok(list),
    }
}

/// Reads `path` and replaces the personal list with its contents.
pub async fn import_list<S: KeyValueStore>(
    store: &CatalogStore<S>,
    path: &Path,
) -> AppResult<ListChange> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::validation(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let list = parse_import(&text)?;
    info!(path = %path.display(), count = list.len(), "Importing personal list");
    replace_list(store, list).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{Category, ListRejection};
    use marquee_db::{MemoryKvStore, PersonalListRepository};

    use crate::error::ErrorCode;

    fn movie(id: &str) -> Movie {
        Movie {
            id: MovieId::from(id),
            title: format!("Movie {}", id),
            description: String::new(),
            image: String::new(),
            rating: 4.5,
            category: Category::TopRated,
        }
    }

    fn store_with_catalog(n: usize) -> CatalogStore<MemoryKvStore> {
        let catalog = (1..=n).map(|i| movie(&i.to_string())).collect();
        CatalogStore::with_state(
            PersonalListRepository::new(MemoryKvStore::new()),
            StoreState {
                catalog,
                ..StoreState::default()
            },
        )
    }

    #[tokio::test]
    async fn test_add_unknown_movie_is_not_found() {
        let store = store_with_catalog(2);

        let err = add_to_list(&store, &MovieId::from("99")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(show_list(&store).items.is_empty());
    }

    #[tokio::test]
    async fn test_eleventh_add_returns_notice() {
        let store = store_with_catalog(11);
        for i in 1..=10 {
            let change = add_to_list(&store, &MovieId::from(i.to_string())).await.unwrap();
            assert_eq!(change.outcome, Outcome::Applied);
        }

        let change = add_to_list(&store, &MovieId::from("11")).await.unwrap();

        assert_eq!(
            change.outcome,
            Outcome::Rejected {
                reason: ListRejection::Full { max: 10 }
            }
        );
        assert_eq!(change.notice.as_deref(), Some("list full (10 movies max)"));
        assert_eq!(change.list.count, 10);
        assert!(change.list.full);
        assert_eq!(change.list.remaining, 0);
    }

    #[tokio::test]
    async fn test_remove_absent_is_unchanged() {
        let store = store_with_catalog(1);

        let change = remove_from_list(&store, &MovieId::from("1")).await;

        assert_eq!(change.outcome, Outcome::Unchanged);
        assert!(change.notice.is_none());
    }

    #[tokio::test]
    async fn test_replace_refuses_oversized_or_repeated_lists() {
        let store = store_with_catalog(0);

        let eleven: Vec<Movie> = (0..11).map(|i| movie(&i.to_string())).collect();
        let err = replace_list(&store, eleven).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = replace_list(&store, vec![movie("1"), movie("1")])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(show_list(&store).items.is_empty());
    }

    #[tokio::test]
    async fn test_export_then_import_restores_list() {
        let store = store_with_catalog(3);
        add_to_list(&store, &MovieId::from("3")).await.unwrap();
        add_to_list(&store, &MovieId::from("1")).await.unwrap();

        let exported = serde_json::to_string(&export_list(&store)).unwrap();
        clear_list(&store).await.unwrap();
        assert!(show_list(&store).items.is_empty());

        let list = parse_import(&exported).unwrap();
        replace_list(&store, list).await.unwrap();

        let ids: Vec<_> = show_list(&store)
            .items
            .into_iter()
            .map(|m| m.id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_parse_import_formats() {
        let bare = r#"[{"id": 4, "title": "Bare", "rating": "2"}]"#;
        assert_eq!(parse_import(bare).unwrap()[0].id.as_str(), "4");

        let legacy = r#"{"schemaVersion": "1.0", "list": []}"#;
        assert!(parse_import(legacy).unwrap().is_empty());

        let foreign = r#"{"version": "2.0", "list": []}"#;
        assert_eq!(
            parse_import(foreign).unwrap_err().code,
            ErrorCode::ValidationError
        );

        assert!(parse_import("not json").is_err());
    }
}
