//! `PostgreSQL` resume collection.
//!
//! `type` and `order` are stored as `kind` and `sort_order` to stay clear of
//! SQL keywords.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use folio_core::ResumeItemId;

use super::{PgStore, RepositoryError, ResumeStore};
use crate::models::{ResumeItem, ResumePatch};

const COLUMNS: &str = "id, kind, title, organization, location, description, start_date, \
                       end_date, is_current, skill_level, sort_order";

#[derive(Debug, sqlx::FromRow)]
struct ResumeRow {
    id: ResumeItemId,
    kind: String,
    title: String,
    organization: Option<String>,
    location: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    is_current: bool,
    skill_level: Option<f64>,
    sort_order: i32,
}

impl From<ResumeRow> for ResumeItem {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            title: row.title,
            organization: row.organization,
            location: row.location,
            start_date: row.start_date,
            end_date: row.end_date,
            current: row.is_current,
            description: row.description,
            skill_level: row.skill_level,
            order: row.sort_order,
        }
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn list_resume(&self, kind: &str) -> Result<Vec<ResumeItem>, RepositoryError> {
        // UUIDv7 ids break `sort_order` ties in insertion order.
        let rows = sqlx::query_as::<_, ResumeRow>(&format!(
            r"
            SELECT {COLUMNS}
            FROM folio.resume_item
            WHERE kind = $1
            ORDER BY sort_order ASC, id ASC
            "
        ))
        .bind(kind)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_resume(&self, id: ResumeItemId) -> Result<Option<ResumeItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            "SELECT {COLUMNS} FROM folio.resume_item WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_resume(&self, item: ResumeItem) -> Result<ResumeItem, RepositoryError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            r"
            INSERT INTO folio.resume_item ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "
        ))
        .bind(item.id)
        .bind(&item.kind)
        .bind(&item.title)
        .bind(&item.organization)
        .bind(&item.location)
        .bind(&item.description)
        .bind(item.start_date)
        .bind(item.end_date)
        .bind(item.current)
        .bind(item.skill_level)
        .bind(item.order)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into())
    }

    async fn update_resume(
        &self,
        id: ResumeItemId,
        patch: &ResumePatch,
    ) -> Result<Option<ResumeItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            r"
            UPDATE folio.resume_item
            SET kind = COALESCE($2, kind),
                title = COALESCE($3, title),
                organization = COALESCE($4, organization),
                location = COALESCE($5, location),
                description = COALESCE($6, description),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                is_current = COALESCE($9, is_current),
                skill_level = COALESCE($10, skill_level),
                sort_order = COALESCE($11, sort_order)
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(&patch.kind)
        .bind(&patch.title)
        .bind(&patch.organization)
        .bind(&patch.location)
        .bind(&patch.description)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(patch.current)
        .bind(patch.skill_level)
        .bind(patch.order)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_resume(&self, id: ResumeItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM folio.resume_item WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
