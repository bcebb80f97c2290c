//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! folio-cli user create -u admin -e admin@example.com -p 'correct horse battery staple'
//! folio-cli user list
//! ```
//!
//! Passwords are stored according to `PASSWORD_SCHEME`, the same setting the
//! server uses to check them.

use folio_server::db::UserStore;
use folio_server::models::User;
use folio_server::services::auth::{AuthError, AuthService, PasswordScheme};

/// Create a new user.
///
/// # Errors
///
/// Returns an error if `PASSWORD_SCHEME` is invalid, the username or password
/// is blank, the email is malformed, the username or email is taken, or the
/// database cannot be reached.
pub async fn create(
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let scheme = std::env::var("PASSWORD_SCHEME")
        .ok()
        .map(|raw| raw.parse::<PasswordScheme>())
        .transpose()?
        .unwrap_or_default();

    let store = super::connect().await?;
    tracing::info!("Creating user: {} ({})", username, role);
    let user = create_in(&store, scheme, username, email, password, role).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}, Email: {}, Scheme: {}",
        user.id,
        user.username,
        user.email,
        scheme
    );
    if scheme == PasswordScheme::PlainText {
        tracing::warn!("Password stored in plain text (PASSWORD_SCHEME=plaintext)");
    }
    Ok(())
}

/// Store a user whose credential is protected with `scheme`.
///
/// # Errors
///
/// Returns `AuthError` for a blank username or password, a malformed email,
/// a taken username or email, or a store failure.
pub async fn create_in(
    users: &dyn UserStore,
    scheme: PasswordScheme,
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<User, AuthError> {
    let verifier = scheme.verifier();
    AuthService::new(users, verifier.as_ref())
        .create_user(username, email, password, role)
        .await
}

/// List users. Credentials are never printed.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;
    let users = store.list_users().await?;

    tracing::info!("Users ({})", users.len());
    for user in users {
        tracing::info!(
            "  {} | {} | {} | {} | created {}",
            user.id,
            user.username,
            user.email,
            user.role,
            user.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use folio_server::db::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_create_stores_hashed_credential() {
        let store = MemoryStore::new();

        let user = create_in(
            &store,
            PasswordScheme::Argon2,
            "admin",
            "admin@example.com",
            "correctpass",
            "admin",
        )
        .await
        .unwrap();

        assert_eq!(user.role, "admin");
        assert!(user.password.starts_with("$argon2"));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_username_and_password() {
        let store = MemoryStore::new();

        for (username, password) in [("", "correctpass"), ("admin", ""), ("  ", "  ")] {
            let err = create_in(
                &store,
                PasswordScheme::PlainText,
                username,
                "admin@example.com",
                password,
                "admin",
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AuthError::InvalidUser(_)), "{err}");
        }

        assert!(store.list_users().await.unwrap().is_empty());
    }
}
