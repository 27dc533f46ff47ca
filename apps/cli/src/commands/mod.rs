//! # Commands Module
//!
//! Everything the `marquee` binary can do, as plain async functions.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs            ◄─── You are here (exports)
//! ├── catalog.rs        ◄─── Load, list, create, update, delete movies
//! ├── personal_list.rs  ◄─── Show, add, remove, import, export "my list"
//! └── users.rs          ◄─── Register, login
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ marquee my-list add 42                                               │
//! │         │                                                               │
//! │         │ (clap, cli.rs)                                                │
//! │         ▼                                                               │
//! │  load_catalog(&store, &remote)       ◄── catalog needed to resolve 42   │
//! │  add_to_list(&store, &"42".into())                                      │
//! │         │                                                               │
//! │         │ (serde_json)                                                  │
//! │         ▼                                                               │
//! │  stdout: { "outcome": {"status":"applied"}, "list": {...} }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each function takes only what it needs: the [`CatalogStore`], the
//! [`RemoteClient`], or both.
//!
//! [`CatalogStore`]: crate::state::CatalogStore
//! [`RemoteClient`]: marquee_remote::RemoteClient

pub mod catalog;
pub mod personal_list;
pub mod users;
