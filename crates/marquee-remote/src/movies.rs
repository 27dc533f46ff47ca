//! # Movies Resource
//!
//! | Operation  | Request                    | Result                      |
//! |------------|----------------------------|-----------------------------|
//! | fetch_all  | `GET {base}/movies`        | every movie, server order   |
//! | create     | `POST {base}/movies`       | created movie with its id   |
//! | replace    | `PUT {base}/movies/{id}`   | updated movie               |
//! | delete     | `DELETE {base}/movies/{id}`| nothing                     |

use marquee_core::{Movie, MovieDraft, MovieId};
use reqwest::Method;
use tracing::{debug, info};

use crate::client::RemoteClient;
use crate::error::RemoteResult;

/// Catalog operations against the movies resource.
#[derive(Debug, Clone, Copy)]
pub struct MovieApi<'a> {
    client: &'a RemoteClient,
}

impl<'a> MovieApi<'a> {
    pub(crate) fn new(client: &'a RemoteClient) -> Self {
        MovieApi { client }
    }

    /// Fetches the whole catalog.
    ///
    /// An empty JSON array is a valid, empty catalog. An empty or `null`
    /// body is [`RemoteError::EmptyPayload`](crate::RemoteError::EmptyPayload).
    pub async fn fetch_all(&self) -> RemoteResult<Vec<Movie>> {
        let url = self.client.movies_url(None)?;
        let movies: Vec<Movie> = self.client.get_json(url).await?;
        info!(count = movies.len(), "Catalog fetched");
        Ok(movies)
    }

    /// Creates a movie. The service assigns the id.
    pub async fn create(&self, draft: &MovieDraft) -> RemoteResult<Movie> {
        let url = self.client.movies_url(None)?;
        let movie: Movie = self.client.send_json(Method::POST, url, draft).await?;
        info!(id = %movie.id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    /// Replaces every field of movie `id`.
    pub async fn replace(&self, id: &MovieId, draft: &MovieDraft) -> RemoteResult<Movie> {
        let url = self.client.movies_url(Some(id.as_str()))?;
        let movie: Movie = self
            .client
            .send_json(Method::PUT, url, draft)
            .await
            .map_err(|e| e.for_entity("Movie", id.as_str()))?;
        debug!(id = %movie.id, "Movie replaced");
        Ok(movie)
    }

    /// Deletes movie `id`.
    pub async fn delete(&self, id: &MovieId) -> RemoteResult<()> {
        let url = self.client.movies_url(Some(id.as_str()))?;
        self.client
            .delete(url)
            .await
            .map_err(|e| e.for_entity("Movie", id.as_str()))?;
        info!(id = %id, "Movie deleted");
        Ok(())
    }
}
