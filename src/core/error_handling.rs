//! Error reporting shared by the CLI and the suite pipeline
//!
//! Errors that a user can fix (unknown case names, bad config values) are
//! reported with their own message. System errors (I/O on the report stream,
//! logger setup) are reported with the operation that failed, and the full
//! detail goes to the debug log.

/// Errors that know whether their message is meant for the user
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error at the right level of detail.
///
/// ```rust,no_run
/// # use spoolsuite::core::error_handling::log_error_with_context;
/// # use spoolsuite::core::validation::ValidationError;
/// let err = ValidationError::new("Verbosity must be between 0 and 2");
/// log_error_with_context(&err, "Loading configuration");
/// // Logs: "FATAL: Verbosity must be between 0 and 2"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Text suitable for printing to stderr when logging may be filtered out
pub fn describe_error<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => user_msg.to_string(),
        _ => format!("{}: {}", operation_context, error),
    }
}
