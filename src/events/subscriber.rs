//! Subscriber handles held by the registry.
//!
//! The registry never sees a transport. It holds [`Subscriber`] handles that
//! can take a frame or be closed; the SSE adapter backs them with a bounded
//! queue and tests back them with fakes.

use super::Frame;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Process-unique subscriber identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Why a frame could not be handed to a subscriber. Either way the
/// subscriber is treated as gone.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("subscriber is closed")]
    Closed,
    #[error("subscriber queue is full")]
    Full,
}

pub trait Subscriber: Send + Sync + 'static {
    fn id(&self) -> SubscriberId;

    /// Hands one frame over without waiting.
    fn send(&self, frame: &Frame) -> Result<(), SendError>;

    /// Ends the stream behind this handle. Idempotent.
    fn close(&self);
}

pub type SubscriberHandle = Arc<dyn Subscriber>;

/// Subscriber backed by a bounded mpsc queue; the receiving half feeds one
/// SSE response.
///
/// A reader that falls `buffer` frames behind counts as dead.
pub struct ChannelSubscriber {
    id: SubscriberId,
    sender: Mutex<Option<mpsc::Sender<Frame>>>,
}

impl ChannelSubscriber {
    pub fn new(buffer: usize) -> (Arc<Self>, mpsc::Receiver<Frame>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let subscriber = Arc::new(Self {
            id: SubscriberId::next(),
            sender: Mutex::new(Some(sender)),
        });
        (subscriber, receiver)
    }
}

impl Subscriber for ChannelSubscriber {
    fn id(&self) -> SubscriberId {
        self.id
    }

    fn send(&self, frame: &Frame) -> Result<(), SendError> {
        let sender = self.sender.lock();
        let Some(sender) = sender.as_ref() else {
            return Err(SendError::Closed);
        };
        sender.try_send(frame.clone()).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }

    fn close(&self) {
        // Dropping the only sender ends the receiver once it is drained.
        self.sender.lock().take();
    }
}
