//! Document store access.
//!
//! Handlers talk to the store through the [`DocumentStore`] trait so the
//! backend is chosen once at startup and injected via `AppState`:
//!
//! - [`PgStore`] - `PostgreSQL` (schema `folio`), used in production
//! - [`MemoryStore`] - in-process collections, used by tests and local demos
//!
//! ## Collections
//!
//! - `portfolio_item` - portfolio projects, newest first
//! - `resume_item` - resume entries, grouped by type and sorted by `order`
//! - `app_user` - admin users (unique username and email)
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are embedded in
//! [`MIGRATOR`]. They are NOT run on server startup:
//! ```bash
//! cargo run -p folio-cli -- migrate
//! ```

pub mod memory;
pub mod portfolio;
pub mod resume;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use folio_core::{PortfolioItemId, ResumeItemId};

use crate::models::{PortfolioItem, PortfolioPatch, ResumeItem, ResumePatch, User};

pub use memory::MemoryStore;

/// Embedded `PostgreSQL` migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Portfolio collection operations.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// All items, optionally restricted to one category, newest first.
    async fn list_portfolio(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PortfolioItem>, RepositoryError>;

    /// One item by identifier.
    async fn get_portfolio(
        &self,
        id: PortfolioItemId,
    ) -> Result<Option<PortfolioItem>, RepositoryError>;

    /// Store a new item and return it as persisted.
    async fn insert_portfolio(&self, item: PortfolioItem)
    -> Result<PortfolioItem, RepositoryError>;

    /// Apply a patch; `None` when no item has that identifier.
    async fn update_portfolio(
        &self,
        id: PortfolioItemId,
        patch: &PortfolioPatch,
    ) -> Result<Option<PortfolioItem>, RepositoryError>;

    /// Remove an item; `false` when it did not exist.
    async fn delete_portfolio(&self, id: PortfolioItemId) -> Result<bool, RepositoryError>;

    /// Remove every item, returning how many were deleted.
    async fn clear_portfolio(&self) -> Result<u64, RepositoryError>;
}

/// Resume collection operations.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Entries of one type, ascending by `order` (ties in insertion order).
    async fn list_resume(&self, kind: &str) -> Result<Vec<ResumeItem>, RepositoryError>;

    /// One entry by identifier.
    async fn get_resume(&self, id: ResumeItemId) -> Result<Option<ResumeItem>, RepositoryError>;

    /// Store a new entry and return it as persisted.
    async fn insert_resume(&self, item: ResumeItem) -> Result<ResumeItem, RepositoryError>;

    /// Apply a patch; `None` when no entry has that identifier.
    async fn update_resume(
        &self,
        id: ResumeItemId,
        patch: &ResumePatch,
    ) -> Result<Option<ResumeItem>, RepositoryError>;

    /// Remove an entry; `false` when it did not exist.
    async fn delete_resume(&self, id: ResumeItemId) -> Result<bool, RepositoryError>;
}

/// User collection operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive username lookup.
    async fn find_user_by_username(&self, username: &str)
    -> Result<Option<User>, RepositoryError>;

    /// Store a new user.
    ///
    /// Fails with `RepositoryError::Conflict` when the username or email is
    /// already taken.
    async fn insert_user(&self, user: User) -> Result<User, RepositoryError>;

    /// All users, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;
}

/// The full document store: all three collections plus a liveness probe.
#[async_trait]
pub trait DocumentStore: PortfolioStore + ResumeStore + UserStore {
    /// Check that the store answers.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed document store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
