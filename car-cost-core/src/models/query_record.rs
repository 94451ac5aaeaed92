use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProjectionInput;

/// A submitted profile as stored in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: i64,
    pub input: ProjectionInput,
    pub created_at: DateTime<Utc>,
}

/// For recording a new submission (no id yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQueryRecord {
    pub input: ProjectionInput,
    pub created_at: DateTime<Utc>,
}

impl NewQueryRecord {
    /// Stamps `input` with the current time.
    pub fn now(input: ProjectionInput) -> Self {
        Self {
            input,
            created_at: Utc::now(),
        }
    }
}
