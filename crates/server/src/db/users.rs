//! `PostgreSQL` user collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use folio_core::{Email, UserId};

use super::{PgStore, RepositoryError, UserStore};
use crate::models::User;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    password: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            username: row.username,
            password: row.password,
            email,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

/// Translate a unique violation into a `Conflict` naming the taken field.
fn conflict_or_database(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let field = match db_err.constraint() {
            Some(name) if name.contains("email") => "email",
            _ => "username",
        };
        return RepositoryError::Conflict(format!("{field} already exists"));
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password, email, role, created_at
            FROM folio.app_user
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO folio.app_user (id, username, password, email, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, password, email, role, created_at
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .bind(&user.role)
        .bind(user.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(conflict_or_database)?;

        row.try_into()
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password, email, role, created_at
            FROM folio.app_user
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
