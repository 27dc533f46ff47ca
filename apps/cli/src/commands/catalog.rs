//! # Catalog Commands
//!
//! Fetch and administer the movie catalog.
//!
//! ## Remote First, Then Store
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create_movie(draft)                                                    │
//! │      │                                                                  │
//! │      ├── validate_movie_draft ── Err ──► VALIDATION_ERROR, no request   │
//! │      │                                                                  │
//! │      ├── POST /movies ────────── Err ──► REMOTE_ERROR, store untouched  │
//! │      │                                                                  │
//! │      └── dispatch(MovieAdded(created)) ──► Ok(created)                  │
//! │                                                                         │
//! │  update_movie and delete_movie follow the same order.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `load_catalog` records a failure in the store (`error` field); a
//! failed mutation leaves the state exactly as it was.

use std::path::Path;

use marquee_core::validation::{validate_movie_draft, DraftMode};
use marquee_core::{
    Action, Category, CoreError, ImageSource, Movie, MovieDraft, MovieId, MoviePatch, Outcome,
};
use marquee_db::KeyValueStore;
use marquee_remote::RemoteClient;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::state::CatalogStore;

/// Fetches the whole catalog and replaces the store's copy.
///
/// ## Store Transitions
/// ```text
/// BeginLoad ──► loading = true, previous error kept until the outcome
///     │
///     ├── Ok(movies) ──► CatalogLoaded(movies)   loading = false, error = None
///     └── Err(e)     ──► LoadFailed(e message)   loading = false, error = Some
/// ```
///
/// The failure is also returned to the caller.
pub async fn load_catalog<S: KeyValueStore>(
    store: &CatalogStore<S>,
    remote: &RemoteClient,
) -> AppResult<Vec<Movie>> {
    debug!("load_catalog command");
    store.dispatch(Action::BeginLoad).await;

    match remote.movies().fetch_all().await {
        Ok(movies) => {
            info!(count = movies.len(), "Catalog loaded");
            store.dispatch(Action::CatalogLoaded(movies.clone())).await;
            Ok(movies)
        }
        Err(e) => {
            warn!(error = %e, "Catalog fetch failed");
            store.dispatch(Action::LoadFailed(e.to_string())).await;
            Err(e.into())
        }
    }
}

/// Returns the loaded catalog, optionally narrowed to one category.
pub fn list_catalog<S: KeyValueStore>(
    store: &CatalogStore<S>,
    category: Option<Category>,
) -> Vec<Movie> {
    let state = store.snapshot();
    match category {
        Some(category) => state.by_category(category).cloned().collect(),
        None => state.catalog.clone(),
    }
}

/// Creates a movie on the remote service and appends it to the catalog.
pub async fn create_movie<S: KeyValueStore>(
    store: &CatalogStore<S>,
    remote: &RemoteClient,
    draft: MovieDraft,
) -> AppResult<Movie> {
    debug!(title = %draft.title, "create_movie command");
    validate_movie_draft(&draft, DraftMode::Create)?;

    let created = remote.movies().create(&draft).await?;
    store.dispatch(Action::MovieAdded(created.clone())).await;

    Ok(created)
}

/// Applies `patch` to catalog movie `id` and replaces it remotely.
///
/// ## Behavior
/// - The movie must be in the loaded catalog
/// - Fields missing from the patch keep their current value, including the
///   poster
/// - The server's answer replaces the catalog entry (the personal list keeps
///   its own copy)
pub async fn update_movie<S: KeyValueStore>(
    store: &CatalogStore<S>,
    remote: &RemoteClient,
    id: &MovieId,
    patch: MoviePatch,
) -> AppResult<Movie> {
    debug!(id = %id, "update_movie command");

    if patch.is_empty() {
        return Err(AppError::validation("Nothing to update"));
    }

    let current = store
        .snapshot()
        .find(id)
        .cloned()
        .ok_or_else(|| CoreError::MovieNotFound(id.to_string()))?;

    let draft = patch.apply_to(&current);
    validate_movie_draft(&draft, DraftMode::Update)?;

    let updated = remote.movies().replace(id, &draft).await?;
    store.dispatch(Action::MovieUpdated(updated.clone())).await;

    Ok(updated)
}

/// Deletes movie `id` remotely, then drops it from the catalog.
///
/// Returns [`Outcome::Unchanged`] when the catalog did not hold the id.
pub async fn delete_movie<S: KeyValueStore>(
    store: &CatalogStore<S>,
    remote: &RemoteClient,
    id: &MovieId,
) -> AppResult<Outcome> {
    debug!(id = %id, "delete_movie command");

    remote.movies().delete(id).await?;
    Ok(store.dispatch(Action::MovieDeleted(id.clone())).await)
}

/// Turns a poster argument into the string stored on the movie.
///
/// - `http(s)://...` and `data:` URLs pass through
/// - anything else is a local file, read and inlined as a data URL
pub async fn resolve_poster(arg: &str) -> AppResult<String> {
    let arg = arg.trim();

    match ImageSource::parse(arg) {
        ImageSource::Missing | ImageSource::Inline { .. } => return Ok(arg.to_string()),
        ImageSource::Remote(url) if url.starts_with("http://") || url.starts_with("https://") => {
            return Ok(url)
        }
        ImageSource::Remote(_) => {}
    }

    let path = Path::new(arg);
    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageSource::mime_for_extension)
        .ok_or_else(|| {
            AppError::validation(format!("Unsupported image type: {}", path.display()))
        })?;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::validation(format!("Cannot read image {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "Poster inlined");
    Ok(ImageSource::encode_inline(mime, &bytes))
}
