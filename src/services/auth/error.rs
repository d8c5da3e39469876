//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::EmailError;

/// Errors that can occur during authentication operations.
///
/// `UnknownEmail` and `BadPassword` are deliberately distinct: the login form
/// tells the user which of the two went wrong, matching the site's historical
/// behavior.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No user registered under this email.
    #[error("no account with this email")]
    UnknownEmail,

    /// The password did not match the stored hash.
    #[error("incorrect password")]
    BadPassword,

    /// A user with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
