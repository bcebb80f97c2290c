//! `PostgreSQL` portfolio collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use folio_core::PortfolioItemId;

use super::{PgStore, PortfolioStore, RepositoryError};
use crate::models::{PortfolioItem, PortfolioPatch};

const COLUMNS: &str = "id, title, category, description, image_url, project_url, github_url, \
                       featured, created_at";

#[derive(Debug, sqlx::FromRow)]
struct PortfolioRow {
    id: PortfolioItemId,
    title: String,
    category: String,
    description: String,
    image_url: String,
    project_url: Option<String>,
    github_url: Option<String>,
    featured: bool,
    created_at: DateTime<Utc>,
}

impl From<PortfolioRow> for PortfolioItem {
    fn from(row: PortfolioRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            description: row.description,
            image_url: row.image_url,
            project_url: row.project_url,
            github_url: row.github_url,
            featured: row.featured,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PortfolioStore for PgStore {
    async fn list_portfolio(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PortfolioItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, PortfolioRow>(&format!(
            r"
            SELECT {COLUMNS}
            FROM folio.portfolio_item
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(category)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_portfolio(
        &self,
        id: PortfolioItemId,
    ) -> Result<Option<PortfolioItem>, RepositoryError> {
        let row = sqlx::query_as::<_, PortfolioRow>(&format!(
            "SELECT {COLUMNS} FROM folio.portfolio_item WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_portfolio(
        &self,
        item: PortfolioItem,
    ) -> Result<PortfolioItem, RepositoryError> {
        let row = sqlx::query_as::<_, PortfolioRow>(&format!(
            r"
            INSERT INTO folio.portfolio_item ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.category)
        .bind(&item.description)
        .bind(&item.image_url)
        .bind(&item.project_url)
        .bind(&item.github_url)
        .bind(item.featured)
        .bind(item.created_at)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into())
    }

    async fn update_portfolio(
        &self,
        id: PortfolioItemId,
        patch: &PortfolioPatch,
    ) -> Result<Option<PortfolioItem>, RepositoryError> {
        let row = sqlx::query_as::<_, PortfolioRow>(&format!(
            r"
            UPDATE folio.portfolio_item
            SET title = COALESCE($2, title),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url),
                project_url = COALESCE($6, project_url),
                github_url = COALESCE($7, github_url),
                featured = COALESCE($8, featured)
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.category)
        .bind(&patch.description)
        .bind(&patch.image_url)
        .bind(&patch.project_url)
        .bind(&patch.github_url)
        .bind(patch.featured)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_portfolio(&self, id: PortfolioItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM folio.portfolio_item WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_portfolio(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM folio.portfolio_item")
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }
}
