//! # Live Events
//!
//! Server-sent "state changed" notifications for order viewers and admin
//! dashboards.
//!
//! - [`registry`] - the [`BroadcastRegistry`] task and its [`RegistryHandle`]
//! - [`subscriber`] - the [`Subscriber`] handle trait and its queue-backed implementation
//! - [`event`] - [`Event`] payloads and the [`Frame`]s written to subscribers
//! - [`stream`] - [`SubscriptionStream`], one per open HTTP stream
//! - [`notify`] - [`Notifier`], the events published after each write
//!
//! Delivery is best-effort and at most once. Clients react to an event by
//! re-fetching state, so a missed frame only delays a refresh.

pub mod event;
pub mod notify;
pub mod registry;
pub mod stream;
pub mod subscriber;

pub use event::*;
pub use notify::Notifier;
pub use registry::{BroadcastRegistry, Registry, RegistryHandle, RegistrySnapshot};
pub use stream::{StreamSettings, SubscriptionStream};
pub use subscriber::*;
