//! Resume entries (education, experience, skills, ...).
//!
//! The `type` field is free text; the site groups entries by it and sorts each
//! group by the caller-supplied `order`. Nothing renumbers `order` values, so
//! collisions and gaps are expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::ResumeItemId;

use super::{ValidationError, missing_required};

/// A stored resume entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeItem {
    #[serde(rename = "_id")]
    pub id: ResumeItemId,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<f64>,
    pub order: i32,
}

/// Request body for creating a resume entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeItemInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    #[serde(default, with = "super::flexible_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "super::flexible_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub skill_level: Option<f64>,
    pub order: Option<i32>,
}

/// A validated resume entry without identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResumeItem {
    pub kind: String,
    pub title: String,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub current: bool,
    pub description: Option<String>,
    pub skill_level: Option<f64>,
    pub order: i32,
}

impl ResumeItemInput {
    /// Check required fields and apply defaults (`current: false`, `order: 0`).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` when `type` or `title` is
    /// absent or blank.
    pub fn validate(self) -> Result<NewResumeItem, ValidationError> {
        let missing = missing_required([
            ("type", self.kind.as_deref()),
            ("title", self.title.as_deref()),
        ]);

        let (Some(kind), Some(title), true) = (self.kind, self.title, missing.is_empty()) else {
            return Err(ValidationError::MissingFields {
                entity: "Resume",
                fields: missing,
            });
        };

        Ok(NewResumeItem {
            kind,
            title,
            organization: self.organization,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            current: self.current.unwrap_or(false),
            description: self.description,
            skill_level: self.skill_level,
            order: self.order.unwrap_or(0),
        })
    }
}

impl NewResumeItem {
    /// Assign an identifier.
    #[must_use]
    pub fn into_document(self) -> ResumeItem {
        ResumeItem {
            id: ResumeItemId::generate(),
            kind: self.kind,
            title: self.title,
            organization: self.organization,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            current: self.current,
            description: self.description,
            skill_level: self.skill_level,
            order: self.order,
        }
    }
}

/// Request body for a partial update of a resume entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    #[serde(default, with = "super::flexible_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "super::flexible_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub skill_level: Option<f64>,
    pub order: Option<i32>,
}

impl ResumePatch {
    /// Reject updates that would blank out `type` or `title`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` naming the blanked fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let blanked = missing_required(
            [
                ("type", self.kind.as_deref()),
                ("title", self.title.as_deref()),
            ]
            .into_iter()
            .filter(|(_, value)| value.is_some()),
        );

        if blanked.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                entity: "Resume",
                fields: blanked,
            })
        }
    }

    /// Apply the supplied fields to a stored entry.
    pub fn apply(&self, item: &mut ResumeItem) {
        if let Some(kind) = &self.kind {
            item.kind.clone_from(kind);
        }
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if self.organization.is_some() {
            item.organization.clone_from(&self.organization);
        }
        if self.location.is_some() {
            item.location.clone_from(&self.location);
        }
        if self.start_date.is_some() {
            item.start_date = self.start_date;
        }
        if self.end_date.is_some() {
            item.end_date = self.end_date;
        }
        if let Some(current) = self.current {
            item.current = current;
        }
        if self.description.is_some() {
            item.description.clone_from(&self.description);
        }
        if self.skill_level.is_some() {
            item.skill_level = self.skill_level;
        }
        if let Some(order) = self.order {
            item.order = order;
        }
    }
}
