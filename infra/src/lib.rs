//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Kloom application,
//! following Clean Architecture principles. It provides the MySQL store
//! handle, schema migrations and the sqlx implementations of the core
//! repository traits.

// Re-export core types for convenience
pub use kloom_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{
    DatabasePool, MySqlPropertyRepository, MySqlPropertyRequestRepository, MySqlUserRepository,
    PoolStatistics,
};

use kloom_shared::config::DatabaseConfig;

/// Open the store and bring the schema up to date
///
/// Migrations run only when `config.run_migrations` is set.
pub async fn initialize(config: DatabaseConfig) -> Result<DatabasePool, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let run_migrations = config.run_migrations;
    let pool = DatabasePool::new(config).await?;
    if run_migrations {
        pool.run_migrations().await?;
    }

    tracing::info!("Infrastructure services initialized successfully");
    Ok(pool)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
