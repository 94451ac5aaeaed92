use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewQueryRecord, QueryRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Append-only log of submitted projection profiles.
#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Stores a profile and returns its id.
    async fn add_query(&self, query: NewQueryRecord) -> Result<i64, RepositoryError>;

    async fn get_query(&self, id: i64) -> Result<QueryRecord, RepositoryError>;

    /// Most recent queries first, at most `limit` of them.
    async fn list_queries(&self, limit: u32) -> Result<Vec<QueryRecord>, RepositoryError>;
}
