//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Marquee                                │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, AppError>                                                    │
//! │         │                                                               │
//! │         ├── ValidationError ─────────────► VALIDATION_ERROR             │
//! │         ├── CoreError::MovieNotFound ─────► NOT_FOUND                   │
//! │         ├── RemoteError ──────────────────► REMOTE_ERROR / NOT_FOUND    │
//! │         ├── DbError ──────────────────────► STORAGE_ERROR               │
//! │         └── bad marquee.toml ─────────────► CONFIG_ERROR                │
//! │                                                                         │
//! │  main.rs prints the error as JSON on stderr and exits with status 1:   │
//! │  {"code":"NOT_FOUND","message":"Movie not found: 42"}                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Personal-list rejections are not errors. They travel as an
//! [`Outcome`](marquee_core::Outcome) and the command exits successfully.

use marquee_core::{CoreError, ValidationError};
use marquee_db::DbError;
use marquee_remote::RemoteError;
use serde::Serialize;

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Movie not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Movie or user not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Remote service unreachable or answered with an error
    RemoteError,

    /// Username and password did not match any user
    InvalidCredentials,

    /// Durable storage failed
    StorageError,

    /// Configuration file or environment is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Storage connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Storage migration failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            DbError::PoolExhausted => AppError::new(ErrorCode::StorageError, "Storage is busy"),
            other => {
                tracing::error!("Storage operation failed: {}", other);
                AppError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MovieNotFound(id) => AppError::not_found("Movie", &id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts remote service errors.
impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            RemoteError::InvalidCredentials => {
                AppError::new(ErrorCode::InvalidCredentials, err.to_string())
            }
            ref e if e.is_config_error() => AppError::config(e.to_string()),
            other => AppError::new(ErrorCode::RemoteError, other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
