//! Bridges one long-lived HTTP response to the registry.
//!
//! [`SubscriptionStream::open`] registers a fresh [`ChannelSubscriber`],
//! queues the `connected` frame and starts the heartbeat. Dropping the stream,
//! which is what the server does when the client goes away, stops the
//! heartbeat and unsubscribes.

use super::{Channel, ChannelSubscriber, Event, Frame, RegistryHandle, Subscriber, SubscriberId};
use chrono::Utc;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Per-stream knobs, taken from [`Config`](crate::config::Config).
#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    pub heartbeat_interval: Duration,
    /// Frames a slow reader may fall behind before it is dropped.
    pub buffer: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(25),
            buffer: 64,
        }
    }
}

/// Frames for one subscriber, ending when the registry closes it.
pub struct SubscriptionStream {
    frames: mpsc::Receiver<Frame>,
    guard: SubscriptionGuard,
}

struct SubscriptionGuard {
    registry: RegistryHandle,
    channel: Channel,
    subscriber: SubscriberId,
    heartbeat: CancellationToken,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.heartbeat.cancel();
        match &self.channel {
            Channel::Order(order_id) => self
                .registry
                .unsubscribe_order(order_id.clone(), self.subscriber),
            Channel::Admin => self.registry.unsubscribe_admin(self.subscriber),
        }
        info!(channel = %self.channel, subscriber = %self.subscriber, "Stream closed");
    }
}

impl SubscriptionStream {
    /// Must be called inside a tokio runtime: the heartbeat runs as a task.
    pub fn open(registry: &RegistryHandle, channel: Channel, settings: StreamSettings) -> Self {
        let (subscriber, frames) = ChannelSubscriber::new(settings.buffer);
        let id = subscriber.id();

        // Queued before the subscriber is registered, so no broadcast can overtake it.
        let _ = subscriber.send(&Frame::Event(Arc::new(Event::connected(&channel))));
        match &channel {
            Channel::Order(order_id) => registry.subscribe_order(order_id.clone(), subscriber.clone()),
            Channel::Admin => registry.subscribe_admin(subscriber.clone()),
        }

        let heartbeat = CancellationToken::new();
        if registry.is_closed() {
            // The registry closed the subscriber; only `connected` is left to read.
            debug!(%channel, subscriber = %id, "Registry stopped; stream ends after connect");
        } else {
            tokio::spawn(run_heartbeat(
                subscriber,
                registry.clone(),
                settings.heartbeat_interval,
                heartbeat.clone(),
            ));
            info!(%channel, subscriber = %id, "Stream opened");
        }

        Self {
            frames,
            guard: SubscriptionGuard {
                registry: registry.clone(),
                channel,
                subscriber: id,
                heartbeat,
            },
        }
    }

    pub fn subscriber_id(&self) -> SubscriberId {
        self.guard.subscriber
    }

    pub fn channel(&self) -> &Channel {
        &self.guard.channel
    }
}

impl Stream for SubscriptionStream {
    type Item = Frame;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Frame>> {
        self.frames.poll_recv(cx)
    }
}

/// Emits a keep-alive every `interval` until cancelled, the subscriber is
/// gone, or the registry stops.
async fn run_heartbeat(
    subscriber: Arc<ChannelSubscriber>,
    registry: RegistryHandle,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = Frame::KeepAlive(Utc::now().timestamp_millis());
                if let Err(e) = subscriber.send(&frame) {
                    debug!(subscriber = %subscriber.id(), error = %e, "Heartbeat stopped");
                    return;
                }
            }
            () = cancel.cancelled() => return,
            () = registry.closed() => {
                subscriber.close();
                return;
            }
        }
    }
}
