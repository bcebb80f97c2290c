//! Authentication service.
//!
//! Login is a username lookup followed by a credential check. The check is a
//! [`CredentialVerifier`] chosen by configuration:
//!
//! - [`Argon2Verifier`] - the stored value is an Argon2id PHC string
//! - [`PlainTextVerifier`] - exact, case-sensitive equality against a stored
//!   plain-text value, kept only for parity with legacy records
//!
//! No session or token is issued; callers re-authenticate on every call.

mod error;

use std::str::FromStr;
use std::sync::Arc;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use folio_core::Email;

use crate::db::{RepositoryError, UserStore};
use crate::models::{NewUser, User, ValidationError, missing_required};

/// How stored credentials are produced and compared.
pub trait CredentialVerifier: Send + Sync {
    /// The scheme this verifier implements.
    fn scheme(&self) -> PasswordScheme;

    /// Turn a submitted password into its stored form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    fn protect(&self, password: &str) -> Result<String, AuthError>;

    /// Whether `supplied` matches the `stored` credential.
    fn verify(&self, supplied: &str, stored: &str) -> bool;
}

/// Configured password storage scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Argon2,
    PlainText,
}

impl PasswordScheme {
    /// Build the verifier for this scheme.
    #[must_use]
    pub fn verifier(self) -> Arc<dyn CredentialVerifier> {
        match self {
            Self::Argon2 => Arc::new(Argon2Verifier),
            Self::PlainText => Arc::new(PlainTextVerifier),
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Self::Argon2),
            "plaintext" | "plain" => Ok(Self::PlainText),
            other => Err(AuthError::UnknownScheme(other.to_owned())),
        }
    }
}

impl std::fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Argon2 => "argon2",
            Self::PlainText => "plaintext",
        })
    }
}

/// Argon2id hashing with a random salt per credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn scheme(&self) -> PasswordScheme {
        PasswordScheme::Argon2
    }

    fn protect(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    fn verify(&self, supplied: &str, stored: &str) -> bool {
        // A stored value that is not a PHC string can never match.
        PasswordHash::new(stored).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(supplied.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

/// Plain-text storage and comparison. Weak by construction; parity only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextVerifier;

impl CredentialVerifier for PlainTextVerifier {
    fn scheme(&self) -> PasswordScheme {
        PasswordScheme::PlainText
    }

    fn protect(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.to_owned())
    }

    fn verify(&self, supplied: &str, stored: &str) -> bool {
        supplied == stored
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    verifier: &'a dyn CredentialVerifier,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, verifier: &'a dyn CredentialVerifier) -> Self {
        Self { users, verifier }
    }

    /// Check a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the user does not exist or
    /// the password does not match, and `AuthError::Repository` when the
    /// lookup itself fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verifier.verify(password, &user.password) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Create a user, storing the password in the configured form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUser` for a blank username or password,
    /// `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::UserAlreadyExists` when the username or email is taken, and
    /// `AuthError::Repository` for other store failures.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<User, AuthError> {
        let missing = missing_required([("username", Some(username)), ("password", Some(password))]);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields {
                entity: "User",
                fields: missing,
            }
            .into());
        }

        let email = Email::parse(email)?;
        let stored = self.verifier.protect(password)?;

        let user = NewUser {
            username: username.to_owned(),
            password: stored,
            email,
            role: role.to_owned(),
        }
        .into_document(Utc::now());

        self.users.insert_user(user).await.map_err(|e| match e {
            RepositoryError::Conflict(what) => AuthError::UserAlreadyExists(what),
            other => AuthError::Repository(other),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_plaintext_is_exact_and_case_sensitive() {
        let verifier = PlainTextVerifier;
        assert!(verifier.verify("correctpass", "correctpass"));
        assert!(!verifier.verify("CorrectPass", "correctpass"));
        assert!(!verifier.verify("correctpass ", "correctpass"));
    }

    #[test]
    fn test_argon2_round_trip() {
        let verifier = Argon2Verifier;
        let stored = verifier.protect("correctpass").unwrap();

        assert!(stored.starts_with("$argon2"));
        assert!(verifier.verify("correctpass", &stored));
        assert!(!verifier.verify("wrongpass", &stored));
    }

    #[test]
    fn test_argon2_rejects_plaintext_record() {
        assert!(!Argon2Verifier.verify("correctpass", "correctpass"));
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!(
            "argon2".parse::<PasswordScheme>().unwrap(),
            PasswordScheme::Argon2
        );
        assert_eq!(
            "PlainText".parse::<PasswordScheme>().unwrap(),
            PasswordScheme::PlainText
        );
        assert!("bcrypt".parse::<PasswordScheme>().is_err());
        assert_eq!(PasswordScheme::default(), PasswordScheme::Argon2);
    }

    #[tokio::test]
    async fn test_login_with_each_scheme() {
        for scheme in [PasswordScheme::Argon2, PasswordScheme::PlainText] {
            let store = MemoryStore::new();
            let verifier = scheme.verifier();
            let auth = AuthService::new(&store, verifier.as_ref());

            auth.create_user("admin", "admin@example.com", "correctpass", "admin")
                .await
                .unwrap();

            let user = auth.login("admin", "correctpass").await.unwrap();
            assert_eq!(user.username, "admin");

            assert!(matches!(
                auth.login("admin", "wrongpass").await,
                Err(AuthError::InvalidCredentials)
            ));
            assert!(matches!(
                auth.login("nobody", "correctpass").await,
                Err(AuthError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_create_user_conflict() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, &PlainTextVerifier);

        auth.create_user("admin", "admin@example.com", "pw", "admin")
            .await
            .unwrap();
        let err = auth
            .create_user("admin", "other@example.com", "pw", "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_credentials() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, &PlainTextVerifier);

        let err = auth
            .create_user("", "admin@example.com", "", "admin")
            .await
            .unwrap_err();
        match err {
            AuthError::InvalidUser(ValidationError::MissingFields { entity, fields }) => {
                assert_eq!(entity, "User");
                assert_eq!(fields, vec!["username", "password"]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = auth
            .create_user("admin", "admin@example.com", "   ", "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidUser(_)));

        assert!(store.list_users().await.unwrap().is_empty());
        assert!(matches!(
            auth.login("", "").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
