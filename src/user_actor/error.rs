//! Error types for the user actor.

use resource_store::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// An account with the same email already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The password did not match the stored hash.
    #[error("Incorrect password")]
    IncorrectPassword,

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// Hashing or verifying a password failed.
    #[error("Password hashing error: {0}")]
    HashingError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        if let Some(inner) = e.entity_error::<UserError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
