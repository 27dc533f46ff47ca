//! # Storage State
//!
//! The durable key-value store behind the personal list.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  default ───────► Sqlite { Database, KvRepository }                     │
//! │                   <data dir>/marquee.db, WAL, migrations applied        │
//! │                                                                         │
//! │  --ephemeral ───► Memory(MemoryKvStore)                                 │
//! │                   gone when the process exits                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both variants are cheap to clone and share the same underlying store.

use marquee_db::{Database, DbConfig, DbResult, KeyValueStore, KvRepository, MemoryKvStore};
use tracing::info;

use crate::error::AppResult;
use crate::state::config::StorageConfig;

/// Opened key-value backend.
#[derive(Debug, Clone)]
pub enum StorageState {
    /// SQLite file
    Sqlite { db: Database, kv: KvRepository },

    /// Process-local map
    Memory(MemoryKvStore),
}

impl StorageState {
    /// Opens the configured backend.
    pub async fn open(config: &StorageConfig, ephemeral: bool) -> AppResult<Self> {
        if ephemeral {
            info!("Using in-memory storage");
            return Ok(StorageState::Memory(MemoryKvStore::new()));
        }

        let path = config.resolved_database_path()?;
        info!(path = %path.display(), "Opening storage");

        let db = Database::new(DbConfig::new(path).max_connections(config.max_connections)).await?;
        let kv = db.kv();
        Ok(StorageState::Sqlite { db, kv })
    }

    /// Releases the connection pool, if any.
    pub async fn close(&self) {
        if let StorageState::Sqlite { db, .. } = self {
            db.close().await;
        }
    }
}

impl From<MemoryKvStore> for StorageState {
    fn from(store: MemoryKvStore) -> Self {
        StorageState::Memory(store)
    }
}

impl KeyValueStore for StorageState {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        match self {
            StorageState::Sqlite { kv, .. } => kv.get(key).await,
            StorageState::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        match self {
            StorageState::Sqlite { kv, .. } => kv.set(key, value).await,
            StorageState::Memory(store) => store.set(key, value).await,
        }
    }
}
