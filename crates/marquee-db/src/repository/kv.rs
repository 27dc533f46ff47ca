//! # Key-Value Stores
//!
//! String-to-string storage with whole-value writes.
//!
//! ## Guarantees
//! - `set` replaces the value atomically: readers see the old or the new value
//! - a value written by `set` is returned by later `get` calls, including after
//!   a restart for [`KvRepository`]

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Trait
// =============================================================================

/// Durable string storage keyed by string.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = DbResult<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = DbResult<()>> + Send;
}

// =============================================================================
// SQLite Store
// =============================================================================

/// Key-value store backed by the `kv_store` table.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Removes `key`. Returns true if a row was deleted.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl KeyValueStore for KvRepository {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing key");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-process key-value store.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// was written. [`MemoryKvStore::fail_writes`] makes every `set` fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    reject_writes: Arc<AtomicBool>,
}

impl MemoryKvStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Makes subsequent writes fail (`true`) or succeed (`false`).
    pub fn fail_writes(&self, fail: bool) {
        self.reject_writes.store(fail, Ordering::SeqCst);
    }

    fn read(&self, key: &str) -> DbResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| DbError::Internal(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> DbResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DbError::WriteRejected(format!("store is read-only ({key})")));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|e| DbError::Internal(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.read(key)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.write(key, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_sqlite_get_missing_key() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.kv().get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_set_then_overwrite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.set("myList", "first").await.unwrap();
        kv.set("myList", "second").await.unwrap();

        assert_eq!(kv.get("myList").await.unwrap().as_deref(), Some("second"));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_sqlite_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.set("k", "v").await.unwrap();
        assert!(kv.delete("k").await.unwrap());
        assert!(!kv.delete("k").await.unwrap());
        assert_eq!(kv.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_write_after_close_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();
        db.close().await;

        let err = kv.set("k", "v").await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_memory_store_shares_entries_between_clones() {
        let store = MemoryKvStore::new();
        let handle = store.clone();

        store.set("k", "v").await.unwrap();

        assert_eq!(handle.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_memory_store_write_failure() {
        let store = MemoryKvStore::with_entry("k", "old");
        store.fail_writes(true);

        let err = store.set("k", "new").await.unwrap_err();
        assert!(matches!(err, DbError::WriteRejected(_)));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("old"));

        store.fail_writes(false);
        store.set("k", "new").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }
}
