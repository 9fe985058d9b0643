//! Error types for the reservation actor.

use resource_store::FrameworkError;
use thiserror::Error;

/// Errors that can occur during reservation operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(String),

    #[error("Reservation validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ReservationError {
    fn from(e: FrameworkError) -> Self {
        if let Some(inner) = e.entity_error::<ReservationError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ReservationError::NotFound(id),
            other => ReservationError::ActorCommunicationError(other.to_string()),
        }
    }
}
