//! Error types for taskapi
//!
//! A missing task is not an error at the service layer: lookups return
//! `Option` and deletes return `bool`. `NotFound` exists for the outer
//! layers (CLI, HTTP) that turn those negative results into failures.

use thiserror::Error;

/// Result type alias for taskapi operations
pub type Result<T> = std::result::Result<T, TaskApiError>;

/// Main error type for taskapi operations
#[derive(Debug, Error)]
pub enum TaskApiError {
    /// Input rejected before it reached the store
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Requested task does not exist
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Persistence layer failure
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl TaskApiError {
    /// True for failures raised by the persistence layer
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// True for rejected input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<sqlx::Error> for TaskApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for TaskApiError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Store(format!("Migration failed: {}", err))
    }
}

impl From<toml::de::Error> for TaskApiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse config: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskApiError::Validation("title must not be empty".to_string());
        assert_eq!(err.to_string(), "Validation failed: title must not be empty");

        let err = TaskApiError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "Task not found: abc");
    }

    #[test]
    fn test_sqlx_errors_become_store_failures() {
        let err: TaskApiError = sqlx::Error::PoolClosed.into();
        assert!(err.is_store_failure());
        assert!(!err.is_validation());
    }
}
