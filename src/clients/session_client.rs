use crate::model::{Session, SessionCreate, SessionId, User};
use crate::session_actor::SessionError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the session store.
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
}

impl SessionClient {
    pub fn new(inner: ResourceClient<Session>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Session> for SessionClient {
    type Error = SessionError;

    fn inner(&self) -> &ResourceClient<Session> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl SessionClient {
    /// Signs `user` in and returns the token for the `sid` cookie.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn open(&self, user: &User, ttl: Duration) -> Result<SessionId, SessionError> {
        Ok(self
            .inner
            .create(SessionCreate {
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: user.role,
                ttl,
            })
            .await?)
    }

    /// Looks a token up. Expired sessions are deleted and reported as absent.
    #[instrument(skip(self, id), fields(sid = %id))]
    pub async fn resolve(&self, id: SessionId) -> Result<Option<Session>, SessionError> {
        match self.inner.get(id.clone()).await? {
            Some(session) if session.is_expired(Utc::now()) => {
                debug!("Session expired");
                self.close(id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Deletes every session that has expired by `now` and returns how many
    /// went. Sessions whose browser never comes back are only reclaimed here.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionError> {
        let expired = self.inner.find(move |s: &Session| s.is_expired(now)).await?;
        let count = expired.len();
        for session in expired {
            self.close(session.id).await?;
        }
        if count > 0 {
            debug!(count, "Expired sessions purged");
        }
        Ok(count)
    }

    /// Signs out. Closing an unknown or already closed session is not an error.
    #[instrument(skip(self, id), fields(sid = %id))]
    pub async fn close(&self, id: SessionId) -> Result<(), SessionError> {
        match self.inner.delete(id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
