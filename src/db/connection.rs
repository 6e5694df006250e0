//! Database connection management
//!
//! Provides a read-only SQLite connection pool via r2d2.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Database not found: {0}")]
    NotFound(String),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Create a pool over an existing database file.
///
/// The file is opened read-only and never created, so a wrong path fails at
/// startup instead of serving an empty database.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating database connection pool");

    if !Path::new(&config.path).is_file() {
        return Err(DatabaseError::NotFound(config.path.clone()));
    }

    let manager = SqliteConnectionManager::file(&config.path).with_flags(
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI,
    );

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_millis(config.acquire_timeout_ms))
        .build(manager)?;

    debug!("Database connection pool created successfully");
    Ok(pool)
}
