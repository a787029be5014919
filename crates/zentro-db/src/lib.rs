//! Database repositories for the Zentro data layer
//!
//! Repositories are thin wrappers over a `PgPool`, one per table. The
//! `PropertyImageStore` trait is the seam the media manager consumes, so it
//! can run against Postgres in production and an in-memory double in tests.

pub mod db;
pub mod stores;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use zentro_core::{AppConfig, AppError};

pub use db::{InquiryRepository, PropertyImageRepository, PropertyRepository};
pub use stores::PropertyImageStore;

/// Embedded migrations, applied by `connect`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect to the database and run pending migrations.
pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .connect(&config.database_url)
        .await?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run database migrations: {}", e)))?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected and migrations applied"
    );

    Ok(pool)
}
