//! # Users Resource
//!
//! Account records kept by the same REST service as the catalog.
//!
//! ## Login
//! ```text
//! login(credentials)
//!     │
//!     ▼
//! GET {base}/users ──► first user with equal username AND password
//!     │                    │
//!     │ none               ▼
//!     ▼                  Ok(user)
//! Err(InvalidCredentials)
//! ```
//!
//! Matching happens client-side against the clear-text records the service
//! stores. No token is issued.

use marquee_core::{Credentials, User, UserDraft, UserId};
use reqwest::Method;
use tracing::{info, warn};

use crate::client::RemoteClient;
use crate::error::{RemoteError, RemoteResult};

/// Operations against the users resource.
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a RemoteClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a RemoteClient) -> Self {
        UserApi { client }
    }

    /// Lists every user.
    pub async fn list(&self) -> RemoteResult<Vec<User>> {
        let url = self.client.users_url(None)?;
        self.client.get_json(url).await
    }

    /// Fetches user `id`.
    pub async fn get(&self, id: &UserId) -> RemoteResult<User> {
        let url = self.client.users_url(Some(id.as_str()))?;
        self.client
            .get_json(url)
            .await
            .map_err(|e| e.for_entity("User", id.as_str()))
    }

    /// Registers a user.
    pub async fn create(&self, draft: &UserDraft) -> RemoteResult<User> {
        let url = self.client.users_url(None)?;
        let user: User = self.client.send_json(Method::POST, url, draft).await?;
        info!(id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Replaces user `id`.
    pub async fn update(&self, id: &UserId, draft: &UserDraft) -> RemoteResult<User> {
        let url = self.client.users_url(Some(id.as_str()))?;
        self.client
            .send_json(Method::PUT, url, draft)
            .await
            .map_err(|e| e.for_entity("User", id.as_str()))
    }

    /// Deletes user `id`.
    pub async fn delete(&self, id: &UserId) -> RemoteResult<()> {
        let url = self.client.users_url(Some(id.as_str()))?;
        self.client
            .delete(url)
            .await
            .map_err(|e| e.for_entity("User", id.as_str()))
    }

    /// Finds the user whose username and password both match.
    pub async fn login(&self, credentials: &Credentials) -> RemoteResult<User> {
        let users = self.list().await?;

        match users.into_iter().find(|u| credentials.matches(u)) {
            Some(user) => {
                info!(id = %user.id, "Login succeeded");
                Ok(user)
            }
            None => {
                warn!(username = %credentials.username, "Login rejected");
                Err(RemoteError::InvalidCredentials)
            }
        }
    }
}
