//! # marquee-remote: Remote Catalog Service Client
//!
//! HTTP/JSON client for the REST service that owns movies and users.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  client.movies().fetch_all()                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RemoteClient::endpoint(["movies"]) ──► GET {base}/movies              │
//! │       │                                                                 │
//! │       ├── transport error ─────────► ConnectionFailed / Timeout         │
//! │       ├── non-2xx ─────────────────► Http { status } / NotFound         │
//! │       ├── empty or null body ──────► EmptyPayload                       │
//! │       ├── malformed JSON ──────────► Deserialization                    │
//! │       └── ok ──────────────────────► Vec<Movie> (server order)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Base URL, resource paths, timeout
//! - [`client`] - Shared reqwest client and request helpers
//! - [`movies`] - Catalog resource (fetch all, create, replace, delete)
//! - [`users`] - Users resource (CRUD and credential login)
//! - [`error`] - Remote error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marquee_remote::{RemoteClient, RemoteConfig};
//!
//! let client = RemoteClient::new(&RemoteConfig::default())?;
//! let catalog = client.movies().fetch_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod movies;
pub mod users;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::RemoteClient;
pub use config::RemoteConfig;
pub use error::{RemoteError, RemoteResult};
pub use movies::MovieApi;
pub use users::UserApi;
