//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use crate::models::{Email, UserId};

/// The user id reserved for the site administrator.
///
/// By convention this is the first account ever registered. Only this
/// identity may author, edit, or delete posts.
pub const ADMIN_USER_ID: UserId = UserId::new(1);

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// Resolved once at request entry and passed into handlers explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name.
    pub name: String,
}

impl CurrentUser {
    /// Whether this identity is the site administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.id == ADMIN_USER_ID
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
