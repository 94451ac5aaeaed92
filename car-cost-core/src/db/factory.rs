//! Backend selection for the query history store.
//!
//! The CLI only knows a backend by the name given on the command line (or in
//! `CAR_COST_DB_BACKEND`). Each storage crate contributes a
//! [`RepositoryFactory`]; the [`RepositoryRegistry`] picks the one whose name
//! matches and hands it the connection string.

use async_trait::async_trait;
use tracing::debug;

use super::repository::{QueryRepository, RepositoryError};

/// Backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "sqlite";

/// Where the query history lives.
///
/// `connection_string` is backend-specific: a file path or `:memory:` for
/// SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl DbConfig {
    pub fn new(
        backend: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
        }
    }

    /// Backend name as the registry compares it.
    fn backend_key(&self) -> String {
        self.backend.trim().to_ascii_lowercase()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND, ":memory:")
    }
}

/// Opens a [`QueryRepository`] for one storage backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name users select the backend by.
    fn backend_name(&self) -> &'static str;

    /// Open the store, creating and migrating it if needed.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn QueryRepository>, RepositoryError>;
}

/// The storage backends compiled into the binary.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: Vec<Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend. A later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        let name = factory.backend_name();
        self.factories.retain(|existing| existing.backend_name() != name);
        self.factories.push(factory);
    }

    /// Sorted backend names, for error messages and `--help` output.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.iter().map(|f| f.backend_name()).collect();
        names.sort_unstable();
        names
    }

    fn find(
        &self,
        key: &str,
    ) -> Option<&dyn RepositoryFactory> {
        self.factories
            .iter()
            .find(|f| f.backend_name() == key)
            .map(|f| f.as_ref())
    }

    /// Opens the repository for `config.backend`.
    ///
    /// The backend name is matched case-insensitively. An unknown name is a
    /// [`RepositoryError::Configuration`] listing what is available; any other
    /// error comes from the factory itself.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn QueryRepository>, RepositoryError> {
        let key = config.backend_key();
        let Some(factory) = self.find(&key) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        debug!(backend = %key, connection = %config.connection_string, "opening query store");
        factory.create(config).await
    }
}
