//! # Repository Module
//!
//! Storage repositories for Marquee.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogStore (CLI)                                                    │
//! │       │  load() at startup, save(list) after each list mutation        │
//! │       ▼                                                                 │
//! │  PersonalListRepository<S>                                             │
//! │  ├── encodes/decodes the versioned record (marquee-core::persist)      │
//! │  └── logs and discards unreadable records                              │
//! │       │  get("myList") / set("myList", json)                           │
//! │       ▼                                                                 │
//! │  S: KeyValueStore                                                      │
//! │  ├── KvRepository   - SQLite kv_store table                            │
//! │  └── MemoryKvStore  - HashMap, for tests and --ephemeral runs          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - SQLite-backed key-value store
//! - [`kv::MemoryKvStore`] - In-process key-value store
//! - [`personal_list::PersonalListRepository`] - Personal list load/save

pub mod kv;
pub mod personal_list;
