//! # marquee-core: Pure Domain Logic for Marquee
//!
//! This crate is the **heart** of Marquee. It holds the catalog state store's
//! transition function and every domain type, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Marquee Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (browser / CLI)                    │   │
//! │  │    Catalog carousel ──► My List ──► Admin form                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ marquee-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │  persist  │  │ validation│  │   │
//! │  │   │   Movie   │  │  Action   │  │ Persisted │  │   rules   │  │   │
//! │  │   │   User    │  │  apply()  │  │   List    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        marquee-db (SQLite KV)  •  marquee-remote (REST)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Movie, Category, User, etc.)
//! - [`store`] - StoreState, Action and the `apply` transition function
//! - [`persist`] - Schema-versioned personal list record
//! - [`error`] - Domain error types
//! - [`validation`] - Form and input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use marquee_core::store::{apply, Action, StoreState};
//!
//! let state = StoreState::default();
//! let next = apply(&state, Action::BeginLoad);
//!
//! assert!(next.state.loading);
//! assert!(!next.persist);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod persist;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use persist::{PersistedList, Rehydrated};
pub use store::{apply, Action, ListRejection, Outcome, StoreState, Transition};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of movies in the personal list.
///
/// Enforced before insertion: an add against a full list is rejected and
/// leaves the list untouched.
pub const MAX_LIST_SIZE: usize = 10;

/// Schema version written alongside the persisted personal list.
///
/// A stored record carrying any other version rehydrates as an empty list.
pub const STORAGE_VERSION: &str = "1.0";

/// Key under which the personal list is stored.
pub const STORAGE_KEY: &str = "myList";

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;
