//! # User Actor
//!
//! Owns registered accounts. Passwords arrive already hashed (see
//! [`crate::auth`]); the actor only stores the hash.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::{User, UserId};
use resource_store::ResourceActor;

/// Creates a new user actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, UserId::generate);
    (actor, UserClient::new(generic_client))
}
