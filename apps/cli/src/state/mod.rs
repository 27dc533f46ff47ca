//! # State Module
//!
//! Long-lived objects created once per process and shared by commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌───────────────────────┐  ┌──────────────────┐     │
//! │  │  AppConfig   │  │   StorageState        │  │  CatalogStore    │     │
//! │  │              │  │                       │  │                  │     │
//! │  │  [remote]    │  │  SQLite pool  or      │  │  Mutex<Arc<      │     │
//! │  │  [storage]   │──►  in-memory map        │──►    StoreState    │     │
//! │  │  [log]       │  │                       │  │  >> + watch      │     │
//! │  └──────────────┘  └───────────────────────┘  └──────────────────┘     │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: read-only after loading                                  │
//! │  • StorageState: pool / shared map, internally synchronized            │
//! │  • CatalogStore: one dispatch at a time, lock-free snapshot reads      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod storage;
mod store;

pub use config::{
    default_config_path, AppConfig, LogConfig, StorageConfig, ENV_API_URL, ENV_DB_PATH, ENV_LOG,
    ENV_TIMEOUT_SECS,
};
pub use storage::StorageState;
pub use store::CatalogStore;
