//! # Menu Client
//!
//! High-level API for the menu actor.
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl MenuClient {
    #[instrument(skip(self))]
    pub async fn add(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn edit(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// The whole menu in the order dishes were added.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<MenuItem>, MenuError> {
        let mut items = self.list().await?;
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, PLACEHOLDER_IMAGE};
    use resource_store::mock::MockClient;

    fn item(id: &str, name: &str) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: name.into(),
            price: 3.0,
            img: PLACEHOLDER_IMAGE.into(),
            category: Category::Snacks,
        }
    }

    #[tokio::test]
    async fn menu_is_sorted_by_id() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_find()
            .return_ok(vec![item("0002", "Kachori"), item("0001", "Samosa")]);

        let client = MenuClient::new(mock.client());
        let menu = client.menu().await.unwrap();
        let names: Vec<_> = menu.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Samosa", "Kachori"]);
        mock.verify();
    }

    #[tokio::test]
    async fn validation_errors_keep_their_variant() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_update("0001".into()).return_err(FrameworkError::EntityError(Box::new(
            MenuError::ValidationError("name is required".into()),
        )));

        let client = MenuClient::new(mock.client());
        let err = client
            .edit("0001".into(), MenuItemUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, MenuError::ValidationError("name is required".into()));
        mock.verify();
    }
}
