//! # Reservation Actor
//!
//! Owns table bookings. Status changes go through `perform_action` with the
//! target [`ReservationStatus`](crate::model::ReservationStatus) as the action.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ReservationClient;
use crate::model::{Reservation, ReservationId};
use resource_store::ResourceActor;

/// Creates a new reservation actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Reservation>, ReservationClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, ReservationId::generate);
    (actor, ReservationClient::new(generic_client))
}
