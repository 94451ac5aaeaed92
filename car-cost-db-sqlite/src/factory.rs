use async_trait::async_trait;
use car_cost_core::db::{DbConfig, QueryRepository, RepositoryError, RepositoryFactory};
use tracing::info;

use crate::repository::SqliteQueryRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use car_cost_core::db::RepositoryRegistry;
/// use car_cost_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database at `config.connection_string` and bring its schema
    /// up to date.
    ///
    /// The connection string is a file path (created if missing), a
    /// `sqlite://` URL, or `:memory:`.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn QueryRepository>, RepositoryError> {
        let repo = SqliteQueryRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        info!(database = %config.connection_string, "query log ready");
        Ok(Box::new(repo))
    }
}
