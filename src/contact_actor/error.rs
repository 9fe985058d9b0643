//! Error types for the contact actor.

use resource_store::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContactError {
    #[error("Contact message not found: {0}")]
    NotFound(String),

    #[error("Contact validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ContactError {
    fn from(e: FrameworkError) -> Self {
        if let Some(inner) = e.entity_error::<ContactError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ContactError::NotFound(id),
            other => ContactError::ActorCommunicationError(other.to_string()),
        }
    }
}
