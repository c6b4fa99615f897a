//! Error types for the Taskdash client.

use taskdash_core::{Action, CoreError};
use thiserror::Error;

/// Errors that can occur when talking to the Taskdash store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required field is missing; raised before any request is made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store has no record with this id
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// No active account matches the username and password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The account exists but has not been activated by a manager
    #[error("Account is not active yet; a manager must activate it")]
    AccountNotActive,

    /// Registration with a username that is already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// The current session may not perform the action
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Transport failure or a 5xx from the store
    #[error("Network error: {0}")]
    Network(String),

    /// Store returned an unexpected non-success status
    #[error("Store error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse a store response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid store URL
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session slot could not be read or written
    #[error("Session storage error: {0}")]
    Session(String),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl ClientError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::PermissionDenied { .. } => Self::PermissionDenied(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<Action> for ClientError {
    fn from(action: Action) -> Self {
        CoreError::PermissionDenied { action }.into()
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_convert() {
        let err: ClientError = CoreError::validation("title is required").into();
        assert!(matches!(err, ClientError::Validation(ref m) if m == "title is required"));

        let err: ClientError = Action::DeleteTask.into();
        match err {
            ClientError::PermissionDenied(msg) => assert!(msg.contains("delete task")),
            e => panic!("Expected PermissionDenied, got: {:?}", e),
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ClientError::not_found("Project", 7);
        assert_eq!(err.to_string(), "Project not found: 7");
    }
}
