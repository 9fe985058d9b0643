//! # User Client
//!
//! Accounts, registration and login checks on top of the user actor.
use crate::auth::{self, PasswordError};
use crate::model::{normalize_email, Role, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the user actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl From<PasswordError> for UserError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Empty => UserError::ValidationError(e.to_string()),
            other => UserError::HashingError(other.to_string()),
        }
    }
}

async fn blocking<R: Send + 'static>(
    f: impl FnOnce() -> Result<R, PasswordError> + Send + 'static,
) -> Result<R, UserError> {
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| UserError::HashingError(e.to_string()))?
        .map_err(UserError::from)
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = normalize_email(email);
        Ok(self
            .inner
            .find_one(move |user: &User| user.email == email)
            .await?)
    }

    /// Creates an account after checking the email is free.
    ///
    /// The check and the insert are two requests, so two concurrent sign-ups
    /// with the same email can both pass the check.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        role: Role,
    ) -> Result<UserId, UserError> {
        if self.find_by_email(&email).await?.is_some() {
            warn!("Email already registered");
            return Err(UserError::AlreadyExists(normalize_email(&email)));
        }
        let password_hash = blocking(move || auth::hash_password(&password)).await?;
        let id = self
            .inner
            .create(UserCreate {
                name,
                email,
                password_hash,
                role,
            })
            .await?;
        info!(user_id = %id, "Registered");
        Ok(id)
    }

    /// Checks a login attempt and returns the account on success.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: String) -> Result<User, UserError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(normalize_email(email)))?;
        let hash = user.password_hash.clone();
        if blocking(move || auth::verify_password(&password, &hash)).await? {
            debug!(user_id = %user.id, "Password verified");
            Ok(user)
        } else {
            Err(UserError::IncorrectPassword)
        }
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }
}
