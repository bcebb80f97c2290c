//! Document shapes for the three collections.
//!
//! Each collection has three faces:
//! - the stored document (`PortfolioItem`, `ResumeItem`, `User`), serialized to
//!   clients in camelCase with the identifier under `_id`
//! - an input type deserialized from request bodies, where every field is
//!   optional so missing required fields surface as [`ValidationError`]s with a
//!   useful message instead of a serde rejection
//! - a patch type for partial updates

pub mod portfolio;
pub mod resume;
pub mod user;

use thiserror::Error;

pub use portfolio::{NewPortfolioItem, PortfolioItem, PortfolioItemInput, PortfolioPatch};
pub use resume::{NewResumeItem, ResumeItem, ResumeItemInput, ResumePatch};
pub use user::{NewUser, User, UserSummary};

/// A document failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank.
    #[error("{entity} validation failed: {} required", join_fields(.fields))]
    MissingFields {
        /// Collection-level name used in the message ("Portfolio", "Resume", "User").
        entity: &'static str,
        /// JSON names of the offending fields, in schema order.
        fields: Vec<&'static str>,
    },
}

fn join_fields(fields: &[&'static str]) -> String {
    match fields {
        [single] => format!("`{single}` is"),
        many => {
            let quoted: Vec<String> = many.iter().map(|f| format!("`{f}`")).collect();
            format!("{} are", quoted.join(", "))
        }
    }
}

/// Names of required string fields that are absent or blank, in input order.
pub(crate) fn missing_required<'a>(
    fields: impl IntoIterator<Item = (&'static str, Option<&'a str>)>,
) -> Vec<&'static str> {
    fields
        .into_iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
}

/// Lenient timestamp parsing for date fields supplied by the admin UI.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as midnight
/// UTC). `null` and absent fields deserialize to `None`.
pub(crate) mod flexible_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, de::Error as _};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_missing_fields_message_single() {
        let err = ValidationError::MissingFields {
            entity: "Portfolio",
            fields: vec!["title"],
        };
        assert_eq!(
            err.to_string(),
            "Portfolio validation failed: `title` is required"
        );
    }

    #[test]
    fn test_missing_fields_message_many() {
        let err = ValidationError::MissingFields {
            entity: "Resume",
            fields: vec!["type", "title"],
        };
        assert_eq!(
            err.to_string(),
            "Resume validation failed: `type`, `title` are required"
        );
    }

    #[test]
    fn test_missing_required_treats_blank_as_missing() {
        let missing = missing_required([
            ("title", Some("Weather App")),
            ("category", Some("   ")),
            ("description", None),
        ]);
        assert_eq!(missing, vec!["category", "description"]);
    }

    #[test]
    fn test_flexible_date_accepts_rfc3339_and_plain_dates() {
        let ts = flexible_date::parse("2021-06-01T12:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);

        let day = flexible_date::parse("2019-09-01").unwrap();
        assert_eq!((day.year(), day.month(), day.day()), (2019, 9, 1));
        assert_eq!(day.hour(), 0);

        assert!(flexible_date::parse("September 2019").is_none());
    }
}
