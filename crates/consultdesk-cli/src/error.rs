//! CLI error types.

use consultdesk_core::ScheduleError;
use consultdesk_store::{ServiceError, StoreError};
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid user input.
    #[error("invalid input: {0}")]
    Validation(#[from] ScheduleError),

    /// Schedule store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Lookup of an unknown schedule.
    #[error("{0}")]
    NotFound(String),

    /// Output encoding error.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => Self::Validation(e),
            ServiceError::Store(e) => Self::Store(e),
            ServiceError::UnknownEvent(_) => Self::NotFound(err.to_string()),
        }
    }
}
