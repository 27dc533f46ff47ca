//! # marquee-db: Durable Storage for Marquee
//!
//! This crate provides the durable key-value store behind the personal list.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Marquee Data Flow                                │
//! │                                                                         │
//! │  CatalogStore::dispatch(PersonalListItemAdded)                         │
//! │       │  transition.persist == true                                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    marquee-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ PersonalListRepo   │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│   └► KeyValueStore │  │ 001_kv.sql │  │   │
//! │  │   │               │    │       ├ KvRepo     │  │            │  │   │
//! │  │   │               │    │       └ MemoryKv   │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/marquee.db   table kv_store(key, value)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value stores and the personal list repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marquee_db::{Database, DbConfig, PersonalListRepository};
//!
//! let db = Database::new(DbConfig::new("marquee.db")).await?;
//! let lists = PersonalListRepository::new(db.kv());
//!
//! let list = lists.load().await;
//! lists.save(&list).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::kv::{KeyValueStore, KvRepository, MemoryKvStore};
pub use repository::personal_list::PersonalListRepository;
