//! # Order Actor
//!
//! Owns every order placed at checkout.
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`] / [`OrderActionResult`] for status changes
//!
//! The actor's context is a [`UserClient`]: `run` must be given one so
//! `on_create` can check that a linked user exists.
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new(32);
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(order_actor.run(user_client.clone()));
//!
//! let order = order_client.place(params).await?;
//! order_client.set_status(order.id, OrderStatus::Preparing).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::{Order, OrderId};
use resource_store::ResourceActor;

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, OrderId::generate);
    (actor, OrderClient::new(generic_client))
}
