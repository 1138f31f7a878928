//! SQLite database adapters for the geocode cache.

pub mod connection;
pub mod geocode_repository;

pub use connection::{connect, connect_in_memory, verify_connection, ConnectionError};
pub use geocode_repository::{GeocodeCacheStats, SqliteGeocodeCache};

use sqlx::SqlitePool;

use crate::domain::models::DatabaseConfig;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open the configured database and apply pending migrations.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = connect(config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = connect_in_memory().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
