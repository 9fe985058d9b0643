//! [`ActorEntity`] implementation for [`MenuItem`].

use super::MenuError;
use crate::model::{optional, required, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, PLACEHOLDER_IMAGE};
use async_trait::async_trait;
use resource_store::ActorEntity;

fn valid_price(price: f64) -> Result<f64, MenuError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(MenuError::ValidationError(format!("invalid price: {price}")))
    }
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        Ok(Self {
            id,
            name: required("name", params.name).map_err(MenuError::ValidationError)?,
            price: valid_price(params.price)?,
            img: optional(params.img).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            category: params.category,
        })
    }

    /// Applies the fields present in the edit. A blank image falls back to the placeholder.
    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), MenuError> {
        if let Some(name) = update.name {
            self.name = required("name", name).map_err(MenuError::ValidationError)?;
        }
        if let Some(price) = update.price {
            self.price = valid_price(price)?;
        }
        if let Some(img) = update.img {
            self.img = optional(Some(img)).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), MenuError> {
        Ok(())
    }
}
