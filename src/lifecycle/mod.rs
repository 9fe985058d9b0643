//! Process lifecycle: starting the actors, wiring them together, and
//! shutting everything down in order.
//!
//! - [`RestaurantSystem`] - owns every actor task and the broadcast registry
//! - [`setup_tracing`] - logging setup

pub mod restaurant_system;
pub mod tracing;

pub use restaurant_system::*;
pub use tracing::*;
