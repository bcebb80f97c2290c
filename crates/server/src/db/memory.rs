//! In-process document store.
//!
//! Keeps each collection in insertion order behind a `tokio::sync::RwLock`
//! and reproduces the `PostgreSQL` backend's ordering and uniqueness rules.
//! Nothing is persisted.

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::{PortfolioItemId, ResumeItemId};

use super::{DocumentStore, PortfolioStore, RepositoryError, ResumeStore, UserStore};
use crate::models::{PortfolioItem, PortfolioPatch, ResumeItem, ResumePatch, User};

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    portfolio: RwLock<Vec<PortfolioItem>>,
    resume: RwLock<Vec<ResumeItem>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn list_portfolio(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PortfolioItem>, RepositoryError> {
        let items = self.portfolio.read().await;
        // Newest insert first, then a stable sort keeps that order for equal timestamps.
        let mut matching: Vec<PortfolioItem> = items
            .iter()
            .rev()
            .filter(|item| category.is_none_or(|c| item.category == c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn get_portfolio(
        &self,
        id: PortfolioItemId,
    ) -> Result<Option<PortfolioItem>, RepositoryError> {
        let items = self.portfolio.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn insert_portfolio(
        &self,
        item: PortfolioItem,
    ) -> Result<PortfolioItem, RepositoryError> {
        let mut items = self.portfolio.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(RepositoryError::Conflict(format!("{} already exists", item.id)));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update_portfolio(
        &self,
        id: PortfolioItemId,
        patch: &PortfolioPatch,
    ) -> Result<Option<PortfolioItem>, RepositoryError> {
        let mut items = self.portfolio.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            patch.apply(item);
            item.clone()
        }))
    }

    async fn delete_portfolio(&self, id: PortfolioItemId) -> Result<bool, RepositoryError> {
        let mut items = self.portfolio.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }

    async fn clear_portfolio(&self) -> Result<u64, RepositoryError> {
        let mut items = self.portfolio.write().await;
        let removed = items.len();
        items.clear();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn list_resume(&self, kind: &str) -> Result<Vec<ResumeItem>, RepositoryError> {
        let items = self.resume.read().await;
        let mut matching: Vec<ResumeItem> = items
            .iter()
            .filter(|item| item.kind == kind)
            .cloned()
            .collect();
        matching.sort_by_key(|item| item.order);
        Ok(matching)
    }

    async fn get_resume(&self, id: ResumeItemId) -> Result<Option<ResumeItem>, RepositoryError> {
        let items = self.resume.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn insert_resume(&self, item: ResumeItem) -> Result<ResumeItem, RepositoryError> {
        let mut items = self.resume.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(RepositoryError::Conflict(format!("{} already exists", item.id)));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update_resume(
        &self,
        id: ResumeItemId,
        patch: &ResumePatch,
    ) -> Result<Option<ResumeItem>, RepositoryError> {
        let mut items = self.resume.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            patch.apply(item);
            item.clone()
        }))
    }

    async fn delete_resume(&self, id: ResumeItemId) -> Result<bool, RepositoryError> {
        let mut items = self.resume.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.username == user.username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;
        let mut all = users.clone();
        all.sort_by_key(|user| user.created_at);
        Ok(all)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
