//! Admin user records.
//!
//! `User` deliberately does not implement `Serialize`: the stored credential
//! must never reach a response body. Handlers expose [`UserSummary`] instead.

use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::{Email, UserId};

/// Default role for new users.
pub const DEFAULT_ROLE: &str = "admin";

/// A stored user.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Stored credential, in whatever form the configured verifier expects.
    pub password: String,
    pub email: Email,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A user about to be inserted. `password` is already in stored form.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Email,
    pub role: String,
}

impl NewUser {
    /// Assign an identifier and creation time.
    #[must_use]
    pub fn into_document(self, now: DateTime<Utc>) -> User {
        User {
            id: UserId::generate(),
            username: self.username,
            password: self.password,
            email: self.email,
            role: self.role,
            created_at: now,
        }
    }
}

/// The public projection of a user returned after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: Email,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
