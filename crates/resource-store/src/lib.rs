//! # Resource Store
//!
//! A small document store in which every record type is owned by its own
//! actor. It follows a **Resource-Oriented** layout on top of the **Actor
//! Model**: each resource type gets the same CRUD + find + action surface,
//! and all state for that type lives inside one Tokio task.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record, its create/update payloads,
//!    its actions and its validation hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop owning the records
//! 3. **Interface Layer** ([`ResourceClient`]) - a cloneable, typed handle
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use resource_store::{ActorEntity, ResourceActor};
//!
//! #[derive(Clone, Debug)]
//! struct Dish {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Debug)] struct DishCreate { name: String }
//! #[derive(Debug)] struct DishUpdate { name: Option<String> }
//! #[derive(Debug)] enum DishAction {}
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32;
//!     type Create = DishCreate;
//!     type Update = DishUpdate;
//!     type Action = DishAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = DishError;
//!
//!     fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     async fn on_update(&mut self, update: DishUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: DishAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut next = 0;
//!     let (actor, client) = ResourceActor::<Dish>::new(10, move || { next += 1; next });
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(DishCreate { name: "Dal Makhani".into() }).await.unwrap();
//!     let dish = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(dish.name, "Dal Makhani");
//!
//!     let matches = client.find(|d: &Dish| d.name.starts_with("Dal")).await.unwrap();
//!     assert_eq!(matches.len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the
//! constructor, so actors that need each other's clients can all be created
//! first and wired afterwards.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed sequentially within an actor, so the store needs no lock
//! - Different resource types are served in parallel
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations so
//! typed clients can be unit tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Predicate, ResourceRequest, Response};
