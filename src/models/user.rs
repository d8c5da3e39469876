//! User domain type.

use crate::models::{CurrentUser, Email, UserId};

/// A registered user.
///
/// The password hash lives only in the `users` table and in the auth service;
/// it is never part of the domain type handed to handlers or templates.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID. Id 1 is the site administrator.
    pub id: UserId,
    /// User's email address, unique across the site.
    pub email: Email,
    /// Display name shown next to comments.
    pub name: String,
}

impl User {
    /// Convert into the session identity stored for this user.
    #[must_use]
    pub fn into_current(self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            email: self.email,
            name: self.name,
        }
    }
}
