//! Portfolio project entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::PortfolioItemId;

use super::{ValidationError, missing_required};

/// A stored portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(rename = "_id")]
    pub id: PortfolioItemId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a portfolio item.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
    #[serde(default, with = "super::flexible_date")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A portfolio item that passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortfolioItem {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl PortfolioItemInput {
    /// Check required fields and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` naming every required field
    /// (`title`, `category`, `description`, `imageUrl`) that is absent or blank.
    pub fn validate(self) -> Result<NewPortfolioItem, ValidationError> {
        let missing = missing_required([
            ("title", self.title.as_deref()),
            ("category", self.category.as_deref()),
            ("description", self.description.as_deref()),
            ("imageUrl", self.image_url.as_deref()),
        ]);

        let (Some(title), Some(category), Some(description), Some(image_url), true) = (
            self.title,
            self.category,
            self.description,
            self.image_url,
            missing.is_empty(),
        ) else {
            return Err(ValidationError::MissingFields {
                entity: "Portfolio",
                fields: missing,
            });
        };

        Ok(NewPortfolioItem {
            title,
            category,
            description,
            image_url,
            project_url: self.project_url,
            github_url: self.github_url,
            featured: self.featured.unwrap_or(false),
            created_at: self.created_at,
        })
    }
}

impl NewPortfolioItem {
    /// Assign an identifier and fill `createdAt` with `now` unless supplied.
    #[must_use]
    pub fn into_document(self, now: DateTime<Utc>) -> PortfolioItem {
        PortfolioItem {
            id: PortfolioItemId::generate(),
            title: self.title,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            project_url: self.project_url,
            github_url: self.github_url,
            featured: self.featured,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// Request body for a partial update.
///
/// Absent and `null` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
}

impl PortfolioPatch {
    /// Reject updates that would blank out a required field.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` for required fields supplied
    /// as blank strings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let blanked = missing_required(
            [
                ("title", self.title.as_deref()),
                ("category", self.category.as_deref()),
                ("description", self.description.as_deref()),
                ("imageUrl", self.image_url.as_deref()),
            ]
            .into_iter()
            .filter(|(_, value)| value.is_some()),
        );

        if blanked.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                entity: "Portfolio",
                fields: blanked,
            })
        }
    }

    /// Apply the supplied fields to a stored item.
    pub fn apply(&self, item: &mut PortfolioItem) {
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(category) = &self.category {
            item.category.clone_from(category);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(image_url) = &self.image_url {
            item.image_url.clone_from(image_url);
        }
        if let Some(project_url) = &self.project_url {
            item.project_url = Some(project_url.clone());
        }
        if let Some(github_url) = &self.github_url {
            item.github_url = Some(github_url.clone());
        }
        if let Some(featured) = self.featured {
            item.featured = featured;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(value: serde_json::Value) -> PortfolioItemInput {
        serde_json::from_value(value).unwrap()
    }

    fn weather_app() -> serde_json::Value {
        json!({
            "title": "Weather App",
            "category": "app",
            "description": "Real-time weather application",
            "imageUrl": "https://img.example/weather.png",
        })
    }

    #[test]
    fn test_validate_applies_defaults() {
        let item = input(weather_app()).validate().unwrap();
        assert!(!item.featured);
        assert_eq!(item.project_url, None);
        assert_eq!(item.created_at, None);

        let now = Utc::now();
        let doc = item.into_document(now);
        assert_eq!(doc.created_at, now);
        assert_eq!(doc.title, "Weather App");
    }

    #[test]
    fn test_validate_reports_missing_title() {
        let mut body = weather_app();
        body.as_object_mut().unwrap().remove("title");

        let err = input(body).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields {
                entity: "Portfolio",
                fields: vec!["title"],
            }
        );
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let err = input(json!({ "category": "web", "imageUrl": "" }))
            .validate()
            .unwrap_err();
        let ValidationError::MissingFields { fields, .. } = err;
        assert_eq!(fields, vec!["title", "description", "imageUrl"]);
    }

    #[test]
    fn test_input_ignores_unknown_fields() {
        let mut body = weather_app();
        body["__v"] = json!(0);
        body["tags"] = json!(["rust"]);
        assert!(input(body).validate().is_ok());
    }

    #[test]
    fn test_input_rejects_wrong_types() {
        let mut body = weather_app();
        body["featured"] = json!("yes");
        assert!(serde_json::from_value::<PortfolioItemInput>(body).is_err());
    }

    #[test]
    fn test_serializes_camel_case_with_mongo_style_id() {
        let doc = input(weather_app()).validate().unwrap().into_document(Utc::now());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["_id"], json!(doc.id.to_string()));
        assert_eq!(value["imageUrl"], json!("https://img.example/weather.png"));
        assert_eq!(value["featured"], json!(false));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("projectUrl").is_none());
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut doc = input(weather_app()).validate().unwrap().into_document(Utc::now());
        let patch: PortfolioPatch = serde_json::from_value(json!({
            "title": "Weather Dashboard",
            "featured": true,
            "githubUrl": "https://github.com/example/weather",
        }))
        .unwrap();

        patch.validate().unwrap();
        patch.apply(&mut doc);

        assert_eq!(doc.title, "Weather Dashboard");
        assert!(doc.featured);
        assert_eq!(doc.category, "app");
        assert_eq!(
            doc.github_url.as_deref(),
            Some("https://github.com/example/weather")
        );
    }

    #[test]
    fn test_patch_rejects_blanking_required_field() {
        let patch: PortfolioPatch = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert!(patch.validate().is_err());

        let patch: PortfolioPatch =
            serde_json::from_value(json!({ "projectUrl": "" })).unwrap();
        assert!(patch.validate().is_ok());
    }
}
