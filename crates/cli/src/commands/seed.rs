//! Seed the portfolio collection with sample projects.
//!
//! Projects come from a YAML list using the API's field names. By default the
//! collection is cleared first, so seeding twice leaves one copy of each
//! project.

use std::path::Path;

use chrono::Utc;
use folio_server::db::{PortfolioStore, RepositoryError};
use folio_server::models::{NewPortfolioItem, PortfolioItemInput, ValidationError};
use thiserror::Error;
use tracing::info;

/// Built-in sample projects.
const SAMPLE_PORTFOLIO: &str = include_str!("../../data/sample_portfolio.yaml");

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Project #{index}: {source}")]
    Invalid {
        index: usize,
        source: ValidationError,
    },

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub removed: u64,
    pub inserted: usize,
}

/// Parse and validate a YAML list of projects.
///
/// # Errors
///
/// Returns `SeedError::Yaml` for malformed YAML and `SeedError::Invalid` for
/// the first project missing a required field (1-based index).
pub fn parse_projects(yaml: &str) -> Result<Vec<NewPortfolioItem>, SeedError> {
    let inputs: Vec<PortfolioItemInput> = serde_yaml::from_str(yaml)?;

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            input
                .validate()
                .map_err(|source| SeedError::Invalid { index: i + 1, source })
        })
        .collect()
}

/// Insert `projects`, clearing the collection first unless `keep_existing`.
///
/// # Errors
///
/// Returns `SeedError::Repository` if a store operation fails.
pub async fn seed_projects(
    store: &dyn PortfolioStore,
    projects: Vec<NewPortfolioItem>,
    keep_existing: bool,
) -> Result<SeedSummary, SeedError> {
    let removed = if keep_existing {
        0
    } else {
        store.clear_portfolio().await?
    };

    let mut inserted = 0;
    for project in projects {
        let item = store.insert_portfolio(project.into_document(Utc::now())).await?;
        info!(id = %item.id, title = %item.title, "Inserted project");
        inserted += 1;
    }

    Ok(SeedSummary { removed, inserted })
}

/// Seed portfolio items from `file` or the built-in samples.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the database
/// cannot be reached.
pub async fn portfolio(
    file: Option<&Path>,
    keep_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let yaml = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading projects from file");
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SeedError::Read {
                    path: path.display().to_string(),
                    source,
                })?
        }
        None => SAMPLE_PORTFOLIO.to_owned(),
    };

    // Validate before connecting to the database
    let projects = parse_projects(&yaml)?;
    info!(projects = projects.len(), "Parsed projects");

    let store = super::connect().await?;
    let summary = seed_projects(&store, projects, keep_existing).await?;

    info!("Seeding complete!");
    info!("  Removed: {}", summary.removed);
    info!("  Inserted: {}", summary.inserted);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use folio_server::db::MemoryStore;

    use super::*;

    #[test]
    fn test_builtin_samples_are_valid() {
        let projects = parse_projects(SAMPLE_PORTFOLIO).unwrap();
        assert_eq!(projects.len(), 6);
        assert_eq!(projects.iter().filter(|p| p.featured).count(), 4);
        assert!(projects.iter().any(|p| p.title == "Mobile Game" && p.category == "app"));
    }

    #[test]
    fn test_invalid_project_reports_index() {
        let yaml = "
- title: Fine
  category: web
  description: ok
  imageUrl: https://img.example/a.png
- title: Broken
  category: web
";
        let err = parse_projects(yaml).unwrap_err();
        assert!(matches!(err, SeedError::Invalid { index: 2, .. }));
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_items() {
        let store = MemoryStore::new();
        let projects = parse_projects(SAMPLE_PORTFOLIO).unwrap();

        seed_projects(&store, projects.clone(), false).await.unwrap();
        let summary = seed_projects(&store, projects.clone(), false).await.unwrap();
        assert_eq!(summary, SeedSummary { removed: 6, inserted: 6 });
        assert_eq!(store.list_portfolio(None).await.unwrap().len(), 6);

        let summary = seed_projects(&store, projects, true).await.unwrap();
        assert_eq!(summary.removed, 0);
        assert_eq!(store.list_portfolio(None).await.unwrap().len(), 12);
    }
}
