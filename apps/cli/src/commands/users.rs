//! # User Commands
//!
//! Registration and login against the remote users resource.
//!
//! Login is a client-side match of username and password over the
//! service's user records. No session or token is kept afterwards.

use marquee_core::validation::validate_user_draft;
use marquee_core::{Credentials, User, UserDraft};
use marquee_remote::RemoteClient;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Validates and registers a new user.
pub async fn register(remote: &RemoteClient, draft: UserDraft) -> AppResult<User> {
    debug!(username = %draft.username, "register command");
    validate_user_draft(&draft)?;

    Ok(remote.users().create(&draft).await?)
}

/// Returns the user matching `credentials`.
///
/// ## Errors
/// * `VALIDATION_ERROR` - username or password left empty
/// * `INVALID_CREDENTIALS` - no user has this username and password
pub async fn login(remote: &RemoteClient, credentials: Credentials) -> AppResult<User> {
    debug!(username = %credentials.username, "login command");

    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    Ok(remote.users().login(&credentials).await?)
}
