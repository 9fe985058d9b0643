//! # Old Rao
//!
//! Ordering server for the Old Rao restaurant: menu, checkout, table
//! reservations, contact messages, accounts, and an admin desk that updates
//! live over server-sent events.
//!
//! ## Architecture
//!
//! Records live in an in-process document store, one actor per record type,
//! built on [`resource_store`]. Each actor owns its records inside a Tokio task
//! and is reached through a typed client ([`clients`]), so no record map is
//! ever shared or locked.
//!
//! Live updates go through the [`events`] module. A single
//! [`BroadcastRegistry`](events::BroadcastRegistry) task maps order ids and the
//! admin channel to open streams. Handlers publish after a write commits;
//! publishing only enqueues, so it cannot slow or fail the response.
//!
//! ## Module Tour
//!
//! - [`model`] - the records and their create/update payloads
//! - [`menu_actor`], [`order_actor`], [`reservation_actor`], [`user_actor`],
//!   [`contact_actor`], [`session_actor`] - validation and hooks per record type
//! - [`clients`] - domain operations over each actor
//! - [`events`] - broadcast registry, subscription streams, notifications
//! - [`http`] - axum routes, extractors and error responses
//! - [`auth`] - password hashing
//! - [`config`] - layered configuration
//! - [`lifecycle`] - starting and stopping everything, logging setup
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info OLDRAO_ADMIN_EMAIL=chef@oldrao.in OLDRAO_ADMIN_PASSWORD=tandoor cargo run
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod contact_actor;
pub mod events;
pub mod http;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod reservation_actor;
pub mod session_actor;
pub mod user_actor;
