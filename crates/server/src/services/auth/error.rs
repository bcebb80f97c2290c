//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or credential mismatch. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Blank username or password when creating a user.
    #[error("{0}")]
    InvalidUser(#[from] ValidationError),

    /// Invalid email format when creating a user.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] folio_core::EmailError),

    /// Username or email already taken.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Unknown password scheme name in configuration.
    #[error("unknown password scheme: {0} (expected `argon2` or `plaintext`)")]
    UnknownScheme(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
