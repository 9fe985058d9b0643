use super::ContactError;
use crate::model::{optional, required, ContactMessage, ContactMessageCreate, ContactMessageId};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::ActorEntity;

/// Custom actions for contact messages.
#[derive(Debug, Clone)]
pub enum ContactAction {
    /// Flags the message as answered and stamps `respondedAt`.
    MarkResponded,
}

#[async_trait]
impl ActorEntity for ContactMessage {
    type Id = ContactMessageId;
    type Create = ContactMessageCreate;
    type Update = ();
    type Action = ContactAction;
    type ActionResult = ContactMessage;
    type Context = ();
    type Error = ContactError;

    fn from_create_params(
        id: ContactMessageId,
        params: ContactMessageCreate,
    ) -> Result<Self, ContactError> {
        let now = Utc::now();
        let field =
            |name: &str, value: String| required(name, value).map_err(ContactError::ValidationError);
        Ok(Self {
            id,
            name: field("name", params.name)?,
            email: field("email", params.email)?,
            phone: optional(params.phone),
            message: field("message", params.message)?,
            responded: false,
            responded_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), ContactError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ContactAction,
        _ctx: &(),
    ) -> Result<ContactMessage, ContactError> {
        match action {
            ContactAction::MarkResponded => {
                let now = Utc::now();
                self.responded = true;
                self.responded_at = Some(now);
                self.updated_at = now;
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(message: &str) -> ContactMessageCreate {
        ContactMessageCreate {
            name: " Kabir ".into(),
            email: "kabir@example.com".into(),
            phone: None,
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn mark_responded_stamps_time() {
        let mut msg = ContactMessage::from_create_params("c1".into(), create("Do you cater?")).unwrap();
        assert!(!msg.responded);
        assert_eq!(msg.name, "Kabir");

        let updated = msg.handle_action(ContactAction::MarkResponded, &()).await.unwrap();
        assert!(updated.responded);
        assert!(updated.responded_at.is_some());
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn blank_message_is_rejected() {
        assert_eq!(
            ContactMessage::from_create_params("c1".into(), create("   ")),
            Err(ContactError::ValidationError("message is required".into()))
        );
    }
}
