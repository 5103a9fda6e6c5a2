//! services/juma/src/bootstrap.rs
//!
//! Wires configuration, storage and the generator into a `SermonLibrary`.

use crate::adapters::{GeminiSermonAdapter, SqliteStorageAdapter};
use crate::config::Config;
use crate::error::AppError;
use crate::library::SermonLibrary;
use crate::telemetry::init_tracing;
use juma_core::{memory::InMemoryStorage, ports::DurableStorage};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::{info, warn};

/// Connects to the configured database and applies migrations.
pub async fn connect_storage(config: &Config) -> Result<SqliteStorageAdapter, AppError> {
    info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let adapter = SqliteStorageAdapter::new(pool);
    info!("Running database migrations...");
    adapter.run_migrations().await?;
    info!("Database migrations complete.");
    Ok(adapter)
}

/// Opens the library on the configured database.
///
/// If the database cannot be used the library still opens, on in-memory
/// storage: the session works, but nothing outlives it.
pub async fn open_library(config: &Config) -> SermonLibrary {
    let storage: Arc<dyn DurableStorage> = match connect_storage(config).await {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            warn!("Durable storage unavailable, changes will not be saved: {}", e);
            Arc::new(InMemoryStorage::new())
        }
    };

    let generator = Arc::new(GeminiSermonAdapter::new(
        config.generation_base_url.clone(),
        config.generation_model.clone(),
        config.generation_timeout,
    ));

    SermonLibrary::open(storage, generator, config.gemini_api_key.clone()).await
}

/// Loads configuration from the environment, sets up logging and opens the
/// library.
pub async fn start() -> Result<SermonLibrary, AppError> {
    let config = Config::from_env()?;
    init_tracing(config.log_level);
    info!("Configuration loaded. Opening the sermon library...");
    Ok(open_library(&config).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unusable_database_falls_back_to_memory() {
        let config = Config {
            database_url: "sqlite:///nonexistent-dir/juma.db".to_string(),
            ..Config::default()
        };
        assert!(connect_storage(&config).await.is_err());

        let library = open_library(&config).await;
        assert_eq!(library.documents().len(), 3);
    }
}
