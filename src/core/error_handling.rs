//! Generic error handling utilities
//!
//! Provides unified error reporting that works across the error types of each layer
//! while keeping raw details out of user-facing output.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on
    /// (bad token, missing permission, wrong repository name, rate limit).
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// - User-actionable errors show their specific message
/// - System errors show the operation context only; detail goes to debug level
///
/// # Examples
/// ```rust,no_run
/// # use reposcan::core::error_handling::log_error_with_context;
/// # use reposcan::scanner::api::ScanError;
/// log_error_with_context(&ScanError::RepoNotFound, "Repository detail");
/// // Logs: "FATAL: Repository not found. Please check the owner and repository name."
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
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
