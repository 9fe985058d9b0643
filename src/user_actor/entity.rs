use super::UserError;
use crate::model::{normalize_email, optional, required, User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use resource_store::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    /// Email uniqueness is enforced by [`UserClient::register`](crate::clients::UserClient::register).
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let email = normalize_email(&params.email);
        if !email.contains('@') {
            return Err(UserError::ValidationError(format!("invalid email: {email}")));
        }
        if params.password_hash.is_empty() {
            return Err(UserError::ValidationError("password is required".to_string()));
        }
        Ok(Self {
            id,
            name: required("name", params.name).map_err(UserError::ValidationError)?,
            email,
            password_hash: params.password_hash,
            phone: None,
            role: params.role,
        })
    }

    /// Profile edits. A blank phone clears it; a blank name is rejected.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if let Some(name) = update.name {
            self.name = required("name", name).map_err(UserError::ValidationError)?;
        }
        if update.phone.is_some() {
            self.phone = optional(update.phone);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), UserError> {
        Ok(())
    }
}
