//! # Remote Configuration
//!
//! Where the REST service lives and how long to wait for it.
//!
//! ## Configuration File Format
//! ```toml
//! # marquee.toml
//! [remote]
//! base_url = "https://673ccf6796b8dcd5f3fbc68e.mockapi.io"
//! movies_path = "movies"
//! users_path = "users"
//! timeout_secs = 15
//! user_agent = "marquee/0.1"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{RemoteError, RemoteResult};

/// Default service host.
pub const DEFAULT_BASE_URL: &str = "https://673ccf6796b8dcd5f3fbc68e.mockapi.io";

/// Remote service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Service root. Resource paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the movies resource, relative to `base_url`.
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path of the users resource, relative to `base_url`.
    #[serde(default = "default_users_path")]
    pub users_path: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_movies_path() -> String {
    "movies".to_string()
}

fn default_users_path() -> String {
    "users".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    concat!("marquee/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            base_url: default_base_url(),
            movies_path: default_movies_path(),
            users_path: default_users_path(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl RemoteConfig {
    /// Default settings pointed at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        RemoteConfig {
            base_url: base_url.into(),
            ..RemoteConfig::default()
        }
    }

    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses `base_url`.
    pub fn parsed_base_url(&self) -> RemoteResult<Url> {
        let url = Url::parse(self.base_url.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(RemoteError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, self.base_url
            ))),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RemoteResult<()> {
        self.parsed_base_url()?;

        if self.movies_path.trim_matches('/').is_empty() {
            return Err(RemoteError::InvalidConfig(
                "movies_path cannot be empty".to_string(),
            ));
        }
        if self.users_path.trim_matches('/').is_empty() {
            return Err(RemoteError::InvalidConfig(
                "users_path cannot be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(RemoteError::InvalidConfig(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
