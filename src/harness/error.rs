//! Harness error types

use crate::core::validation::ValidationError;
use thiserror::Error;

/// Boxed cause returned by a test case's `load()`
pub type LoadFailure = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for harness operations
pub type SuiteResult<T> = std::result::Result<T, SuiteError>;

/// Errors raised while building a registry, collecting a suite or writing a report.
///
/// Test failures are never reported through this type; they become records in
/// the `TestReport`.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Identifier not present in the registry
    #[error("{message}")]
    UnknownCase { name: String, message: String },

    /// The case was found but could not be instantiated
    #[error("Failed to load test case '{name}': {source}")]
    LoadError {
        name: String,
        #[source]
        source: LoadFailure,
    },

    /// Two registry entries share an identifier
    #[error("Test case '{name}' is already registered")]
    DuplicateCase { name: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SuiteError {
    pub fn unknown_case(name: &str, available: &[&str]) -> Self {
        let message = if available.is_empty() {
            format!("Unknown test case '{}' (no test cases are registered)", name)
        } else {
            format!(
                "Unknown test case '{}' (available: {})",
                name,
                available.join(", ")
            )
        };
        SuiteError::UnknownCase {
            name: name.to_string(),
            message,
        }
    }

    pub fn io(operation: &str, source: std::io::Error) -> Self {
        SuiteError::Io {
            operation: operation.to_string(),
            source,
        }
    }
}

impl crate::core::error_handling::ContextualError for SuiteError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            SuiteError::UnknownCase { .. } | SuiteError::Validation(_)
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SuiteError::UnknownCase { message, .. } => Some(message),
            SuiteError::Validation(err) => Some(err.message()),
            _ => None,
        }
    }
}
