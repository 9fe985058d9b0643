use crate::contact_actor::{ContactAction, ContactError};
use crate::model::{ContactMessage, ContactMessageCreate, ContactMessageId};
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the contact actor.
#[derive(Clone)]
pub struct ContactClient {
    inner: ResourceClient<ContactMessage>,
}

impl ContactClient {
    pub fn new(inner: ResourceClient<ContactMessage>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ContactMessage> for ContactClient {
    type Error = ContactError;

    fn inner(&self) -> &ResourceClient<ContactMessage> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl ContactClient {
    /// Stores a message and returns it as committed.
    #[instrument(skip(self, params))]
    pub async fn submit(&self, params: ContactMessageCreate) -> Result<ContactMessage, ContactError> {
        debug!(?params, "submit called");
        let id = self.inner.create(params).await?;
        self.inner
            .get(id.clone())
            .await?
            .ok_or_else(|| ContactError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn mark_responded(&self, id: ContactMessageId) -> Result<ContactMessage, ContactError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, ContactAction::MarkResponded)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn newest_first(&self) -> Result<Vec<ContactMessage>, ContactError> {
        let mut messages = self.list().await?;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::mock::{create_mock_client, expect_create};

    #[tokio::test]
    async fn submit_sends_create_then_reads_back() {
        let (client, mut receiver) = create_mock_client::<ContactMessage>(10);
        let contacts = ContactClient::new(client);

        let task = tokio::spawn(async move {
            contacts
                .submit(ContactMessageCreate {
                    name: "Kabir".into(),
                    email: "kabir@example.com".into(),
                    phone: None,
                    message: "Do you cater?".into(),
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.message, "Do you cater?");
        responder.send(Ok("c1".into())).unwrap();

        // The read-back finds nothing: the message was deleted in between.
        match receiver.recv().await {
            Some(resource_store::ResourceRequest::Get { id, respond_to }) => {
                assert_eq!(id, ContactMessageId::from("c1"));
                respond_to.send(Ok(None)).unwrap();
            }
            _ => panic!("Expected Get request"),
        }

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err, ContactError::NotFound("c1".into()));
    }
}
