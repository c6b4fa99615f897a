/// Core error types for Taskdash
use crate::permissions::Action;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised before anything reaches the backing store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field is missing or empty
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The current session may not perform the action
    #[error("Permission denied: {action} requires the manager role")]
    PermissionDenied { action: Action },
}

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
