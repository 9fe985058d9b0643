//! # Contact Actor
//!
//! Owns messages left through the contact form.

pub mod entity;
pub mod error;

pub use entity::ContactAction;
pub use error::*;

use crate::clients::ContactClient;
use crate::model::{ContactMessage, ContactMessageId};
use resource_store::ResourceActor;

/// Creates a new contact actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ContactMessage>, ContactClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, ContactMessageId::generate);
    (actor, ContactClient::new(generic_client))
}
