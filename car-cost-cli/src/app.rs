use std::path::PathBuf;

use anyhow::{Context, Result};
use car_cost_core::calculations::{CostProjector, Projection};
use car_cost_core::db::RepositoryRegistry;
use car_cost_core::{NewQueryRecord, ProjectionInput, QueryRepository};
use car_cost_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

use crate::logging::log_task_error;
use crate::report::{HistoryReport, ProjectionReport};
use crate::{csv_loader, profile};

/// Registry with every backend compiled into the binary.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Where the profiles of a `project` run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    Reference,
    Toml(PathBuf),
    Csv(PathBuf),
}

pub fn load_profiles(source: &ProfileSource) -> Result<Vec<ProjectionInput>> {
    let profiles = match source {
        ProfileSource::Reference => vec![ProjectionInput::default()],
        ProfileSource::Toml(path) => vec![
            profile::load_from_file(path)
                .with_context(|| format!("Failed to load profile {}", path.display()))?,
        ],
        ProfileSource::Csv(path) => csv_loader::load_from_file(path)
            .with_context(|| format!("Failed to load profiles from {}", path.display()))?,
    };
    debug!(count = profiles.len(), "profiles loaded");
    Ok(profiles)
}

/// Stores the raw input when the profile opted in.
///
/// Returns the new record id, or `None` when nothing was stored.
pub async fn record_query(
    repo: &dyn QueryRepository,
    input: &ProjectionInput,
) -> Result<Option<i64>> {
    if !input.settings.share_data {
        debug!(profile = %input.name, "profile not shared, skipping query log");
        return Ok(None);
    }

    let id = repo
        .add_query(NewQueryRecord::now(input.clone()))
        .await
        .with_context(|| format!("Failed to record query for '{}'", input.name))?;
    info!(id, profile = %input.name, "query recorded");
    Ok(Some(id))
}

/// Projects every profile and renders the reports.
///
/// Any projection error aborts the run before anything is recorded. A
/// recording failure is logged and does not affect the output.
pub async fn run_project(
    profiles: &[ProjectionInput],
    repo: Option<&dyn QueryRepository>,
) -> Result<String> {
    let projector = CostProjector::default();
    let projections: Vec<Projection> = profiles
        .iter()
        .map(|input| {
            projector
                .project(input)
                .with_context(|| format!("Cannot project '{}'", input.name))
        })
        .collect::<Result<_>>()?;

    if let Some(repo) = repo {
        for input in profiles {
            log_task_error("record_query", record_query(repo, input).await.map(|_| ()));
        }
    }

    let reports: Vec<String> = profiles
        .iter()
        .zip(&projections)
        .map(|(input, projection)| ProjectionReport::new(input, projection).to_string())
        .collect();
    Ok(reports.join("\n"))
}

pub async fn run_history(
    repo: &dyn QueryRepository,
    limit: u32,
) -> Result<String> {
    let records = repo
        .list_queries(limit)
        .await
        .context("Failed to list recorded queries")?;
    Ok(HistoryReport::new(&records).to_string())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use car_cost_core::db::DbConfig;
    use car_cost_core::{QueryRecord, RepositoryError};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    async fn memory_repo() -> Box<dyn QueryRepository> {
        build_registry()
            .create(&DbConfig::default())
            .await
            .expect("in-memory repository")
    }

    /// Repository whose writes always fail.
    struct BrokenRepository;

    #[async_trait]
    impl QueryRepository for BrokenRepository {
        async fn add_query(
            &self,
            _query: NewQueryRecord,
        ) -> Result<i64, RepositoryError> {
            Err(RepositoryError::Database("disk full".to_string()))
        }
        async fn get_query(
            &self,
            _id: i64,
        ) -> Result<QueryRecord, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
        async fn list_queries(
            &self,
            _limit: u32,
        ) -> Result<Vec<QueryRecord>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn registry_knows_sqlite() {
        assert_eq!(build_registry().available_backends(), vec!["sqlite"]);
    }

    #[test]
    fn reference_source_is_the_default_profile() {
        let profiles = load_profiles(&ProfileSource::Reference).unwrap();

        assert_eq!(profiles, vec![ProjectionInput::default()]);
    }

    #[test]
    fn missing_profile_file_names_the_path() {
        let source = ProfileSource::Toml(PathBuf::from("/nonexistent/car.toml"));

        let message = format!("{:#}", load_profiles(&source).unwrap_err());

        assert!(message.contains("/nonexistent/car.toml"), "{message}");
    }

    #[tokio::test]
    async fn shared_profile_is_recorded() {
        let repo = memory_repo().await;

        let id = record_query(repo.as_ref(), &ProjectionInput::default())
            .await
            .unwrap()
            .expect("shared profile should be stored");
        let stored = repo.get_query(id).await.unwrap();

        assert_eq!(stored.input, ProjectionInput::default());
    }

    #[tokio::test]
    async fn private_profile_is_not_recorded() {
        let repo = memory_repo().await;
        let mut input = ProjectionInput::default();
        input.settings.share_data = false;

        let result = record_query(repo.as_ref(), &input).await.unwrap();

        assert_eq!(result, None);
        assert!(repo.list_queries(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_records_and_renders() {
        let repo = memory_repo().await;
        let profiles = vec![ProjectionInput::default()];

        let output = run_project(&profiles, Some(repo.as_ref())).await.unwrap();

        assert!(output.starts_with("Peugeot e208"));
        assert_eq!(repo.list_queries(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn project_without_repository_still_renders() {
        let output = run_project(&[ProjectionInput::default()], None).await.unwrap();

        assert!(output.contains("11440.35"));
    }

    #[tokio::test]
    async fn recording_failure_does_not_fail_the_run() {
        let output = run_project(&[ProjectionInput::default()], Some(&BrokenRepository))
            .await
            .unwrap();

        assert!(output.contains("Total cost:"));
    }

    #[tokio::test]
    async fn invalid_profile_aborts_before_recording() {
        let repo = memory_repo().await;
        let mut broken = ProjectionInput::default();
        broken.name = "broken".to_string();
        broken.financing.price = dec!(-1);

        let result = run_project(&[ProjectionInput::default(), broken], Some(repo.as_ref())).await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Cannot project 'broken'"), "{message}");
        assert!(repo.list_queries(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_lists_recorded_profiles() {
        let repo = memory_repo().await;
        run_project(&[ProjectionInput::default()], Some(repo.as_ref()))
            .await
            .unwrap();

        let output = run_history(repo.as_ref(), 5).await.unwrap();

        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("Peugeot e208"));
    }
}
