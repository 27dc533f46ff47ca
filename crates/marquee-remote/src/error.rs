//! # Remote Error Types
//!
//! Error types for calls to the REST service.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Remote Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  Http { status }        │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  NotFound               │ │
//! │  │                 │  │                 │  │  EmptyPayload           │ │
//! │  │                 │  │                 │  │  Deserialization        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │     Users       │                                                   │
//! │  │                 │                                                   │
//! │  │ InvalidCreds    │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote service failures.
#[derive(Debug, Error)]
pub enum RemoteError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid remote configuration.
    #[error("Invalid remote configuration: {0}")]
    InvalidConfig(String),

    /// Base URL cannot be parsed or used.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the service.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not finish in time.
    #[error("Request timed out: {0}")]
    Timeout(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// Non-success HTTP status.
    #[error("HTTP error! status: {status} ({url})")]
    Http { status: u16, url: String },

    /// The addressed record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The service answered with no data.
    #[error("No data received from API ({url})")]
    EmptyPayload { url: String },

    /// Response body is not the expected JSON.
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Request body could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    // =========================================================================
    // User Errors
    // =========================================================================
    /// No user matches the supplied username and password.
    #[error("Invalid username or password")]
    InvalidCredentials,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();

        if err.is_timeout() {
            RemoteError::Timeout(url)
        } else if let Some(status) = err.status() {
            RemoteError::Http {
                status: status.as_u16(),
                url,
            }
        } else if err.is_decode() {
            RemoteError::Deserialization(err.to_string())
        } else if err.is_builder() {
            match std::error::Error::source(&err)
                .and_then(|source| source.downcast_ref::<serde_json::Error>())
            {
                Some(json) => RemoteError::Serialization(json.to_string()),
                None => RemoteError::InvalidConfig(err.to_string()),
            }
        } else {
            RemoteError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for RemoteError {
    fn from(err: url::ParseError) -> Self {
        RemoteError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            RemoteError::Deserialization(err.to_string())
        } else {
            RemoteError::Serialization(err.to_string())
        }
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl RemoteError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// ## Retryable Errors
    /// - Connection failures and timeouts
    /// - 5xx and 429 responses
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::ConnectionFailed(_) | RemoteError::Timeout(_) => true,
            RemoteError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RemoteError::InvalidConfig(_) | RemoteError::InvalidUrl(_)
        )
    }

    /// Returns true for a 404 response or an explicit NotFound.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RemoteError::NotFound { .. } | RemoteError::Http { status: 404, .. }
        )
    }

    /// Rewrites a bare 404 into a NotFound for `entity`/`id`.
    pub fn for_entity(self, entity: &str, id: &str) -> Self {
        if self.is_not_found() {
            RemoteError::NotFound {
                entity: entity.to_string(),
                id: id.to_string(),
            }
        } else {
            self
        }
    }
}
