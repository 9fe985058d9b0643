//! Event frames pushed to stream subscribers.

use crate::model::{ContactMessage, ContactSummary, Order, OrderId, OrderStatus, OrderSummary};
use serde_json::{json, Value};
use std::fmt::Display;
use std::sync::Arc;

/// The named event types a stream can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// First frame on every stream; payload names the channel.
    Connected,
    /// An order's status changed; payload `{id, status}`.
    StatusUpdate,
    /// An order was placed; admin channel only.
    NewOrder,
    /// A contact message arrived; admin channel only.
    NewContact,
}

impl EventKind {
    /// Wire name used in the `event:` line.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Connected => "connected",
            EventKind::StatusUpdate => "status-update",
            EventKind::NewOrder => "new-order",
            EventKind::NewContact => "new-contact",
        }
    }
}

/// A domain event. Transient: lost if nobody is subscribed when published.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub payload: Value,
}

impl Event {
    pub fn connected(channel: &Channel) -> Self {
        Self {
            kind: EventKind::Connected,
            payload: json!({ "channel": channel.to_string() }),
        }
    }

    pub fn status_update(id: &OrderId, status: OrderStatus) -> Self {
        Self {
            kind: EventKind::StatusUpdate,
            payload: json!({ "id": id, "status": status }),
        }
    }

    pub fn new_order(order: &Order) -> Self {
        Self {
            kind: EventKind::NewOrder,
            payload: json!(OrderSummary::from(order)),
        }
    }

    pub fn new_contact(message: &ContactMessage) -> Self {
        Self {
            kind: EventKind::NewContact,
            payload: json!(ContactSummary::from(message)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The payload as compact JSON for the `data:` line.
    pub fn data(&self) -> String {
        self.payload.to_string()
    }
}

/// One unit written to a subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// A domain event, shared between all recipients of one publish.
    Event(Arc<Event>),
    /// Idle keep-alive carrying unix milliseconds. Not a domain event.
    KeepAlive(i64),
}

impl Frame {
    pub fn event(&self) -> Option<&Event> {
        match self {
            Frame::Event(event) => Some(event),
            Frame::KeepAlive(_) => None,
        }
    }
}

/// The registry bucket a stream belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// Viewers of one order. The id is taken literally and never validated.
    Order(OrderId),
    /// Admin dashboards.
    Admin,
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Order(id) => write!(f, "order:{id}"),
            Channel::Admin => f.write_str("admin"),
        }
    }
}
