//! # Storage Repository
//!
//! Generic access to the key→JSON blob table. Typed repositories build on
//! these primitives; nothing else touches the table.
//!
//! ## Recovery-by-Reset
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  load_or_reset(key)                                                 │
//! │       │                                                             │
//! │       ├── key absent ──────────────► default value (no write)       │
//! │       │                                                             │
//! │       ├── value parses ────────────► parsed value                   │
//! │       │                                                             │
//! │       └── value malformed ─────────► warn! + re-persist the         │
//! │                                      serialized default, return it  │
//! │                                                                     │
//! │  Never a partial repair, never an error, never a crash.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;

const UPSERT_SQL: &str = "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

const SELECT_SQL: &str = "SELECT value FROM storage WHERE key = ?1";

const DELETE_SQL: &str = "DELETE FROM storage WHERE key = ?1";

/// Upserts a key on any executor (pool or open transaction).
pub(crate) async fn upsert<'e, E>(executor: E, key: &str, value: &str) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(UPSERT_SQL)
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(executor)
        .await?;
    Ok(())
}

/// Deletes a key on any executor.
pub(crate) async fn delete<'e, E>(executor: E, key: &str) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(DELETE_SQL).bind(key).execute(executor).await?;
    Ok(())
}

/// Repository over the raw key→blob namespace.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    /// Creates a new StorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Reads a key's raw JSON text.
    pub async fn get_raw(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(SELECT_SQL)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// Writes a key's raw JSON text (upsert).
    pub async fn put_raw(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key, "Writing storage key");
        upsert(&self.pool, key, value).await
    }

    /// Removes a key. Removing an absent key is not an error.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        debug!(key, "Deleting storage key");
        delete(&self.pool, key).await
    }

    /// JSON-encodes and writes a value.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let encoded = serde_json::to_string(value)?;
        self.put_raw(key, &encoded).await
    }

    /// Reads and decodes a value, applying recovery-by-reset.
    ///
    /// An absent key yields the default without a write; a malformed value
    /// resets the key to the serialized default and yields the default.
    pub async fn load_or_reset<T>(&self, key: &str) -> DbResult<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, error = %err, "Malformed stored value, resetting to default");
                let fallback = T::default();
                self.put_json(key, &fallback).await?;
                Ok(fallback)
            }
        }
    }

    /// Reads and deletes a key in one transaction (one-shot consume).
    ///
    /// A present-but-malformed value is still consumed; it decodes to
    /// `None`, which callers treat as missing state.
    pub async fn take_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let mut tx = self.pool.begin().await?;

        let raw: Option<String> = sqlx::query_scalar(SELECT_SQL)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;

        if raw.is_some() {
            delete(&mut *tx, key).await?;
        }

        tx.commit().await?;

        match raw {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    warn!(key, error = %err, "Malformed one-shot value, consumed as absent");
                    Ok(None)
                }
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_raw_round_trip_and_upsert() {
        let db = db().await;
        let storage = db.storage();

        assert_eq!(storage.get_raw("k").await.unwrap(), None);

        storage.put_raw("k", "1").await.unwrap();
        assert_eq!(storage.get_raw("k").await.unwrap().as_deref(), Some("1"));

        storage.put_raw("k", "2").await.unwrap();
        assert_eq!(storage.get_raw("k").await.unwrap().as_deref(), Some("2"));

        storage.delete("k").await.unwrap();
        assert_eq!(storage.get_raw("k").await.unwrap(), None);
        // Deleting again is not an error.
        storage.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_load_or_reset_absent_key_does_not_write() {
        let db = db().await;
        let storage = db.storage();

        let value: Vec<String> = storage.load_or_reset("missing").await.unwrap();
        assert!(value.is_empty());
        assert_eq!(storage.get_raw("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_or_reset_recovers_malformed_value() {
        let db = db().await;
        let storage = db.storage();

        // A JSON string where an array is expected.
        storage.put_raw("list", "\"oops\"").await.unwrap();

        let value: Vec<String> = storage.load_or_reset("list").await.unwrap();
        assert!(value.is_empty());

        // The reset was persisted.
        assert_eq!(storage.get_raw("list").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_take_json_is_exactly_once() {
        let db = db().await;
        let storage = db.storage();

        storage.put_json("once", &42i64).await.unwrap();

        assert_eq!(storage.take_json::<i64>("once").await.unwrap(), Some(42));
        assert_eq!(storage.take_json::<i64>("once").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_take_json_consumes_malformed_value() {
        let db = db().await;
        let storage = db.storage();

        storage.put_raw("once", "not json").await.unwrap();

        assert_eq!(storage.take_json::<i64>("once").await.unwrap(), None);
        assert_eq!(storage.get_raw("once").await.unwrap(), None);
    }
}
