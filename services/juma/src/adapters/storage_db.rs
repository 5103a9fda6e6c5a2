//! services/juma/src/adapters/storage_db.rs
//!
//! This module contains the SQLite adapter, which is the concrete implementation
//! of the `DurableStorage` port from the `core` crate. Every record is one row
//! of the `storage_records` table, keyed by the record name.

use async_trait::async_trait;
use chrono::Utc;
use juma_core::ports::{DurableStorage, PortError, PortResult};
use sqlx::{FromRow, SqlitePool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DurableStorage` port.
#[derive(Clone)]
pub struct SqliteStorageAdapter {
    pool: SqlitePool,
}

impl SqliteStorageAdapter {
    /// Creates a new `SqliteStorageAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn fetch(&self, key: &str) -> PortResult<Option<StorageRecord>> {
        sqlx::query_as::<_, StorageRecord>(
            "SELECT value FROM storage_records WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct StorageRecord {
    value: String,
}

fn storage_error(e: sqlx::Error) -> PortError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            PortError::Storage(e.to_string())
        }
        sqlx::Error::Database(db) => PortError::Storage(db.to_string()),
        _ => PortError::Unexpected(e.to_string()),
    }
}

//=========================================================================================
// `DurableStorage` Trait Implementation
//=========================================================================================

#[async_trait]
impl DurableStorage for SqliteStorageAdapter {
    async fn get_item(&self, key: &str) -> PortResult<Option<String>> {
        let record = self.fetch(key).await?;
        Ok(record.map(|r| r.value))
    }

    async fn set_item(&self, key: &str, value: &str) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO storage_records (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM storage_records WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}
