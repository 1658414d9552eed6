//! Validation error type and list-splitting helpers for CLI and config values

use thiserror::Error;

/// A user-correctable problem with an argument or configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl crate::core::error_handling::ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Split comma-separated entries, trim them and drop empties.
///
/// Order of first appearance is preserved; with `dedupe` later repeats are
/// dropped.
pub fn split_and_collect<T, F>(items: &[T], to_string: F, dedupe: bool) -> Vec<String>
where
    F: Fn(&T) -> String,
{
    let mut result: Vec<String> = Vec::new();
    for item in items {
        for part in to_string(item).split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            if dedupe && result.iter().any(|existing| existing == trimmed) {
                continue;
            }
            result.push(trimmed.to_string());
        }
    }
    result
}

/// Validate a test-case identifier: non-empty, no whitespace or `::`
pub fn validate_case_identifier(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("Test case identifier cannot be empty"));
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new(&format!(
            "Test case identifier '{}' contains whitespace",
            name
        )));
    }
    if name.contains("::") {
        return Err(ValidationError::new(&format!(
            "Test case identifier '{}' cannot contain '::'",
            name
        )));
    }
    Ok(())
}

/// Validate glob pattern syntax
pub fn validate_glob_pattern(pattern: &str) -> Result<glob::Pattern, ValidationError> {
    glob::Pattern::new(pattern).map_err(|e| {
        ValidationError::new(&format!("Invalid filter pattern '{}': {}", pattern, e))
    })
}
