//! # Session Actor
//!
//! Server-side session store: maps the opaque `sid` cookie value to the
//! signed-in user and their role. Expired sessions are dropped when presented
//! to [`SessionClient::resolve`](crate::clients::SessionClient::resolve), and
//! the rest by the periodic [`run_sweeper`].

pub mod sweeper;

pub use sweeper::run_sweeper;

use crate::clients::SessionClient;
use crate::model::{Session, SessionCreate, SessionId};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{ActorEntity, FrameworkError, ResourceActor};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Session validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for SessionError {
    fn from(e: FrameworkError) -> Self {
        match e.entity_error::<SessionError>() {
            Some(inner) => inner.clone(),
            None => SessionError::ActorCommunicationError(e.to_string()),
        }
    }
}

#[async_trait]
impl ActorEntity for Session {
    type Id = SessionId;
    type Create = SessionCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = SessionError;

    fn from_create_params(id: SessionId, params: SessionCreate) -> Result<Self, SessionError> {
        if params.ttl <= chrono::Duration::zero() {
            return Err(SessionError::ValidationError(
                "session lifetime must be positive".to_string(),
            ));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            name: params.name,
            role: params.role,
            expires_at: Utc::now() + params.ttl,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), SessionError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Creates a new session actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Session>, SessionClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, SessionId::generate);
    (actor, SessionClient::new(generic_client))
}
