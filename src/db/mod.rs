//! Database access for the blog's SQLite store.
//!
//! ## Tables
//!
//! - `users` - registered accounts (email, display name, password hash)
//! - `posts` - blog posts, one author each, unique titles
//! - `comments` - comments, cascade-deleted with their post
//! - `tower_sessions` - session storage (created by the session store)
//!
//! The schema lives in `migrations/` and is applied once at startup via the
//! embedded [`MIGRATOR`]; nothing is created lazily per request.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod comments;
pub mod posts;
pub mod users;

pub use comments::CommentRepository;
pub use posts::PostRepository;
pub use users::UserRepository;

/// Embedded schema migrations from the `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate email or post title).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created if missing, and foreign key enforcement is
/// switched on for every connection (SQLite leaves it off by default).
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection fails.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
