//! # Menu Actor
//!
//! Owns the dishes shown on `/api/menu` and edited from the admin menu pages.
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuClient;
use crate::model::{MenuItem, MenuItemId};
use resource_store::ResourceActor;

/// Creates a new menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, MenuItemId::generate);
    (actor, MenuClient::new(generic_client))
}
