//! Typed wrappers around [`ResourceClient`](resource_store::ResourceClient).
//!
//! Each client implements [`ActorClient`](resource_store::ActorClient) for the
//! shared get/list/delete calls and adds the domain operations the HTTP layer
//! needs, returning its record's own error type.

pub mod contact_client;
pub mod menu_client;
pub mod order_client;
pub mod reservation_client;
pub mod session_client;
pub mod user_client;

pub use contact_client::*;
pub use menu_client::*;
pub use order_client::*;
pub use reservation_client::*;
pub use session_client::*;
pub use user_client::*;
