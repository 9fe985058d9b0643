//! # ActorEntity Trait
//!
//! The contract every record type (menu item, order, reservation, ...) implements
//! to be managed by the generic [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin the payloads to the record: an order actor only accepts
//! an order's create payload, never a reservation's.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by `ResourceActor`.
///
/// The `Context` type is injected into every hook at `run()` time, which lets a
/// record validate against other actors without holding their clients itself.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Generated by the actor's id function.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Data required to create a new record.
    type Create: Send + Sync + Debug;

    /// Data required to update an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. changing an order's status).
    type Action: Send + Sync + Debug;

    /// Result returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum for the whole record type.
    ///
    /// Boxed into [`FrameworkError::EntityError`](crate::FrameworkError::EntityError)
    /// on the way back to the caller; clients recover it with
    /// [`FrameworkError::entity_error`](crate::FrameworkError::entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its id and create payload. Runs before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed. An error keeps the record.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
