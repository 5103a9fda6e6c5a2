//! services/juma/src/error.rs
//!
//! Defines the primary error type for the service crate.
//!
//! Only startup can fail with it. Once a `SermonLibrary` is open, storage
//! failures are logged and generation failures are `GenerationError`s.

use crate::config::ConfigError;

/// The primary error type for the `juma` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a failed schema migration.
    #[error("Migration Error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
