use crate::storage::StorageError;

use super::plan::PlanError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),
    #[error("Other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Other(e.to_string())
    }
}
