//! # Event Broadcast Registry
//!
//! In-process pub/sub from order ids (and one admin set) to open streams.
//!
//! [`Registry`] is the plain data structure. [`BroadcastRegistry`] owns one
//! and applies commands from a single unbounded queue in its own task, the
//! same way a resource actor owns its store. Handlers talk to it through a
//! cloneable [`RegistryHandle`] whose calls never wait:
//!
//! ```rust,ignore
//! let (registry, handle) = BroadcastRegistry::new();
//! tokio::spawn(registry.run());
//!
//! handle.subscribe_order(order_id.clone(), subscriber);
//! handle.publish_to_order(order_id, Event::status_update(&id, status));
//! ```
//!
//! Because every command goes through one FIFO queue, subscribers of a
//! channel see events in publish order.

use super::{Event, Frame, SubscriberHandle, SubscriberId};
use crate::model::OrderId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type SubscriberSet = HashMap<SubscriberId, SubscriberHandle>;

/// Subscriber sets keyed by order id, plus the admin set.
///
/// An order key exists only while it has at least one subscriber.
#[derive(Default)]
pub struct Registry {
    orders: HashMap<OrderId, SubscriberSet>,
    admins: SubscriberSet,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `subscriber` to the order's set. Re-subscribing the same id is a no-op.
    pub fn subscribe_order(&mut self, order_id: OrderId, subscriber: SubscriberHandle) {
        self.orders
            .entry(order_id)
            .or_default()
            .entry(subscriber.id())
            .or_insert(subscriber);
    }

    /// Removes a subscriber, dropping the order key once its set is empty.
    /// Returns whether the subscriber was a member.
    pub fn unsubscribe_order(&mut self, order_id: &OrderId, subscriber: SubscriberId) -> bool {
        let Some(set) = self.orders.get_mut(order_id) else {
            return false;
        };
        let removed = set.remove(&subscriber).is_some();
        if set.is_empty() {
            self.orders.remove(order_id);
        }
        removed
    }

    pub fn subscribe_admin(&mut self, subscriber: SubscriberHandle) {
        self.admins.entry(subscriber.id()).or_insert(subscriber);
    }

    pub fn unsubscribe_admin(&mut self, subscriber: SubscriberId) -> bool {
        self.admins.remove(&subscriber).is_some()
    }

    /// Sends the event to everyone on the order's channel and returns how many
    /// took it. Subscribers that fail are removed and closed. A missing
    /// channel is not created.
    pub fn publish_to_order(&mut self, order_id: &OrderId, event: Arc<Event>) -> usize {
        let Some(set) = self.orders.get_mut(order_id) else {
            return 0;
        };
        let delivered = deliver(set, &Frame::Event(event));
        if set.is_empty() {
            self.orders.remove(order_id);
        }
        delivered
    }

    pub fn publish_to_admins(&mut self, event: Arc<Event>) -> usize {
        deliver(&mut self.admins, &Frame::Event(event))
    }

    /// Closes and forgets every subscriber.
    pub fn close_all(&mut self) {
        for subscriber in self
            .orders
            .drain()
            .flat_map(|(_, set)| set.into_values())
            .chain(self.admins.drain().map(|(_, s)| s))
        {
            subscriber.close();
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let sorted = |set: &SubscriberSet| {
            let mut ids: Vec<_> = set.keys().copied().collect();
            ids.sort();
            ids
        };
        RegistrySnapshot {
            orders: self
                .orders
                .iter()
                .map(|(id, set)| (id.to_string(), sorted(set)))
                .collect(),
            admins: sorted(&self.admins),
        }
    }
}

fn deliver(set: &mut SubscriberSet, frame: &Frame) -> usize {
    let mut delivered = 0;
    set.retain(|id, subscriber| match subscriber.send(frame) {
        Ok(()) => {
            delivered += 1;
            true
        }
        Err(e) => {
            debug!(subscriber = %id, error = %e, "Dropping subscriber");
            subscriber.close();
            false
        }
    });
    delivered
}

/// Point-in-time view of the registry's membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub orders: BTreeMap<String, Vec<SubscriberId>>,
    pub admins: Vec<SubscriberId>,
}

impl RegistrySnapshot {
    pub fn channel_count(&self) -> usize {
        self.orders.len()
    }

    pub fn has_order_channel(&self, order_id: &str) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn order_subscriber_count(&self, order_id: &str) -> usize {
        self.orders.get(order_id).map_or(0, Vec::len)
    }

    pub fn admin_subscriber_count(&self) -> usize {
        self.admins.len()
    }
}

enum Command {
    SubscribeOrder {
        order_id: OrderId,
        subscriber: SubscriberHandle,
    },
    UnsubscribeOrder {
        order_id: OrderId,
        subscriber: SubscriberId,
    },
    SubscribeAdmin {
        subscriber: SubscriberHandle,
    },
    UnsubscribeAdmin {
        subscriber: SubscriberId,
    },
    PublishToOrder {
        order_id: OrderId,
        event: Arc<Event>,
    },
    PublishToAdmins {
        event: Arc<Event>,
    },
    Snapshot {
        respond_to: oneshot::Sender<RegistrySnapshot>,
    },
    Shutdown,
}

impl Command {
    /// Ends any subscriber carried by a command the registry will not apply.
    fn reject(self) {
        match self {
            Command::SubscribeOrder { subscriber, .. } | Command::SubscribeAdmin { subscriber } => {
                subscriber.close()
            }
            _ => {}
        }
    }
}

/// The task that owns the [`Registry`].
///
/// Runs until [`RegistryHandle::shutdown`] is called or every handle is
/// dropped, then closes all remaining subscribers. Open streams keep handles
/// alive, so the explicit shutdown is what ends a running server.
pub struct BroadcastRegistry {
    receiver: mpsc::UnboundedReceiver<Command>,
    registry: Registry,
}

impl BroadcastRegistry {
    pub fn new() -> (Self, RegistryHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            registry: Registry::new(),
        };
        (actor, RegistryHandle { sender })
    }

    pub async fn run(mut self) {
        info!("Registry started");
        while let Some(command) = self.receiver.recv().await {
            if !self.apply(command) {
                break;
            }
        }
        // No new commands from here on; queued subscribers are closed unseen.
        self.receiver.close();
        while let Ok(command) = self.receiver.try_recv() {
            command.reject();
        }
        let snapshot = self.registry.snapshot();
        info!(
            channels = snapshot.channel_count(),
            admins = snapshot.admin_subscriber_count(),
            "Registry stopping; closing subscribers"
        );
        self.registry.close_all();
    }

    /// Returns `false` once the registry should stop.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SubscribeOrder {
                order_id,
                subscriber,
            } => {
                debug!(%order_id, subscriber = %subscriber.id(), "Subscribe order");
                self.registry.subscribe_order(order_id, subscriber);
            }
            Command::UnsubscribeOrder {
                order_id,
                subscriber,
            } => {
                let removed = self.registry.unsubscribe_order(&order_id, subscriber);
                debug!(%order_id, %subscriber, removed, "Unsubscribe order");
            }
            Command::SubscribeAdmin { subscriber } => {
                debug!(subscriber = %subscriber.id(), "Subscribe admin");
                self.registry.subscribe_admin(subscriber);
            }
            Command::UnsubscribeAdmin { subscriber } => {
                let removed = self.registry.unsubscribe_admin(subscriber);
                debug!(%subscriber, removed, "Unsubscribe admin");
            }
            Command::PublishToOrder { order_id, event } => {
                let event_name = event.name();
                let subscribers = self.registry.publish_to_order(&order_id, event);
                debug!(%order_id, event = event_name, subscribers, "Published to order");
            }
            Command::PublishToAdmins { event } => {
                let event_name = event.name();
                let subscribers = self.registry.publish_to_admins(event);
                debug!(event = event_name, subscribers, "Published to admins");
            }
            Command::Snapshot { respond_to } => {
                let _ = respond_to.send(self.registry.snapshot());
            }
            Command::Shutdown => return false,
        }
        true
    }
}

/// Cloneable, non-blocking access to the [`BroadcastRegistry`].
///
/// Every call only enqueues a command. Once the registry has stopped, calls
/// are logged and dropped: notification never fails the caller.
#[derive(Clone)]
pub struct RegistryHandle {
    sender: mpsc::UnboundedSender<Command>,
}

impl RegistryHandle {
    fn send(&self, command: Command) {
        if let Err(mpsc::error::SendError(command)) = self.sender.send(command) {
            warn!("Registry is closed; dropping command");
            command.reject();
        }
    }

    pub fn subscribe_order(&self, order_id: OrderId, subscriber: SubscriberHandle) {
        self.send(Command::SubscribeOrder {
            order_id,
            subscriber,
        });
    }

    pub fn unsubscribe_order(&self, order_id: OrderId, subscriber: SubscriberId) {
        self.send(Command::UnsubscribeOrder {
            order_id,
            subscriber,
        });
    }

    pub fn subscribe_admin(&self, subscriber: SubscriberHandle) {
        self.send(Command::SubscribeAdmin { subscriber });
    }

    pub fn unsubscribe_admin(&self, subscriber: SubscriberId) {
        self.send(Command::UnsubscribeAdmin { subscriber });
    }

    pub fn publish_to_order(&self, order_id: OrderId, event: Event) {
        self.send(Command::PublishToOrder {
            order_id,
            event: Arc::new(event),
        });
    }

    pub fn publish_to_admins(&self, event: Event) {
        self.send(Command::PublishToAdmins {
            event: Arc::new(event),
        });
    }

    /// Current membership, after every command sent before this call.
    /// `None` once the registry has stopped.
    pub async fn snapshot(&self) -> Option<RegistrySnapshot> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(Command::Snapshot { respond_to }).ok()?;
        response.await.ok()
    }

    /// Stops the registry after the commands already queued. Subscribers
    /// handed over afterwards are closed straight away.
    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Resolves once the registry has stopped taking commands.
    pub async fn closed(&self) {
        self.sender.closed().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::events::{SendError, Subscriber};
    use crate::model::OrderStatus;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Records frames instead of writing to a network.
    pub(crate) struct FakeSubscriber {
        id: SubscriberId,
        frames: Mutex<Vec<Frame>>,
        closed: AtomicBool,
        broken: AtomicBool,
    }

    impl FakeSubscriber {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self {
                id: SubscriberId::next(),
                frames: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
                broken: AtomicBool::new(false),
            })
        }

        /// A subscriber whose connection already went away.
        pub(crate) fn broken() -> Arc<Self> {
            let fake = Self::new();
            fake.broken.store(true, Ordering::SeqCst);
            fake
        }

        pub(crate) fn events(&self) -> Vec<Event> {
            self.frames
                .lock()
                .iter()
                .filter_map(|f| f.event().cloned())
                .collect()
        }

        pub(crate) fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
    }

    impl Subscriber for FakeSubscriber {
        fn id(&self) -> SubscriberId {
            self.id
        }

        fn send(&self, frame: &Frame) -> Result<(), SendError> {
            if self.broken.load(Ordering::SeqCst) || self.is_closed() {
                return Err(SendError::Closed);
            }
            self.frames.lock().push(frame.clone());
            Ok(())
        }

        fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn preparing(id: &str) -> Arc<Event> {
        Arc::new(Event::status_update(&id.into(), OrderStatus::Preparing))
    }

    #[test]
    fn publish_reaches_only_that_order() {
        let mut registry = Registry::new();
        let a = FakeSubscriber::new();
        let b = FakeSubscriber::new();
        registry.subscribe_order("507f".into(), a.clone());
        registry.subscribe_order("999".into(), b.clone());

        let delivered = registry.publish_to_order(&"507f".into(), preparing("507f"));

        assert_eq!(delivered, 1);
        assert_eq!(a.events(), vec![Event::status_update(&"507f".into(), OrderStatus::Preparing)]);
        assert!(b.events().is_empty());
    }

    #[test]
    fn admins_get_admin_events_and_order_viewers_do_not() {
        let mut registry = Registry::new();
        let a = FakeSubscriber::new();
        let b = FakeSubscriber::new();
        let c = FakeSubscriber::new();
        registry.subscribe_admin(a.clone());
        registry.subscribe_admin(b.clone());
        registry.subscribe_order("507f".into(), c.clone());

        let event = Arc::new(Event {
            kind: crate::events::EventKind::NewOrder,
            payload: serde_json::json!({ "id": "42" }),
        });
        assert_eq!(registry.publish_to_admins(event), 2);

        assert_eq!(a.events().len(), 1);
        assert_eq!(b.events().len(), 1);
        assert!(c.events().is_empty());
    }

    #[test]
    fn last_unsubscribe_removes_the_channel() {
        let mut registry = Registry::new();
        let a = FakeSubscriber::new();
        let b = FakeSubscriber::new();
        registry.subscribe_order("1".into(), a.clone());
        registry.subscribe_order("1".into(), b.clone());

        assert!(registry.unsubscribe_order(&"1".into(), a.id()));
        assert!(registry.snapshot().has_order_channel("1"));
        assert!(registry.unsubscribe_order(&"1".into(), b.id()));
        assert!(!registry.snapshot().has_order_channel("1"));
        assert!(!registry.unsubscribe_order(&"1".into(), b.id()));
    }

    #[test]
    fn publishing_to_an_empty_channel_creates_nothing() {
        let mut registry = Registry::new();
        assert_eq!(registry.publish_to_order(&"nobody".into(), preparing("nobody")), 0);
        assert_eq!(registry.snapshot().channel_count(), 0);
    }

    #[test]
    fn disconnected_viewer_gets_nothing_and_nothing_fails() {
        let mut registry = Registry::new();
        let a = FakeSubscriber::new();
        registry.subscribe_order("1".into(), a.clone());
        registry.unsubscribe_order(&"1".into(), a.id());

        assert_eq!(registry.publish_to_order(&"1".into(), preparing("1")), 0);
        assert!(a.events().is_empty());
    }

    #[test]
    fn failed_writes_remove_and_close_the_subscriber() {
        let mut registry = Registry::new();
        let dead = FakeSubscriber::broken();
        let live = FakeSubscriber::new();
        registry.subscribe_order("1".into(), dead.clone());
        registry.subscribe_order("1".into(), live.clone());
        registry.subscribe_admin(FakeSubscriber::broken());

        assert_eq!(registry.publish_to_order(&"1".into(), preparing("1")), 1);
        assert_eq!(registry.publish_to_admins(preparing("1")), 0);

        assert!(dead.is_closed());
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.order_subscriber_count("1"), 1);
        assert_eq!(snapshot.admin_subscriber_count(), 0);
    }

    #[test]
    fn channel_is_dropped_when_its_only_subscriber_fails() {
        let mut registry = Registry::new();
        registry.subscribe_order("1".into(), FakeSubscriber::broken());
        registry.publish_to_order(&"1".into(), preparing("1"));
        assert!(!registry.snapshot().has_order_channel("1"));
    }

    #[test]
    fn subscribing_twice_delivers_once() {
        let mut registry = Registry::new();
        let a = FakeSubscriber::new();
        registry.subscribe_order("1".into(), a.clone());
        registry.subscribe_order("1".into(), a.clone());

        assert_eq!(registry.publish_to_order(&"1".into(), preparing("1")), 1);
        assert_eq!(a.events().len(), 1);
    }

    #[test]
    fn order_and_admin_membership_are_independent() {
        let mut registry = Registry::new();
        let a = FakeSubscriber::new();
        registry.subscribe_order("1".into(), a.clone());
        registry.subscribe_admin(a.clone());

        registry.unsubscribe_admin(a.id());
        assert_eq!(registry.publish_to_order(&"1".into(), preparing("1")), 1);
    }

    #[tokio::test]
    async fn actor_preserves_publish_order() {
        let (registry, handle) = BroadcastRegistry::new();
        let task = tokio::spawn(registry.run());

        let a = FakeSubscriber::new();
        handle.subscribe_order("1".into(), a.clone());
        for status in OrderStatus::ALL {
            handle.publish_to_order("1".into(), Event::status_update(&"1".into(), status));
        }
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.order_subscriber_count("1"), 1);

        let statuses: Vec<_> = a
            .events()
            .iter()
            .map(|e| e.payload["status"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            statuses,
            ["Pending", "Preparing", "Out for Delivery", "Completed", "Cancelled"]
        );

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_closes_every_subscriber() {
        let (registry, handle) = BroadcastRegistry::new();
        let task = tokio::spawn(registry.run());

        let viewer = FakeSubscriber::new();
        let admin = FakeSubscriber::new();
        handle.subscribe_order("1".into(), viewer.clone());
        handle.subscribe_admin(admin.clone());
        handle.shutdown();
        task.await.unwrap();

        assert!(viewer.is_closed());
        assert!(admin.is_closed());
        assert!(handle.snapshot().await.is_none());
        // Publishing after shutdown is silently dropped.
        handle.publish_to_admins(Event::connected(&crate::events::Channel::Admin));
    }

    #[tokio::test]
    async fn late_subscribers_are_closed() {
        let (registry, handle) = BroadcastRegistry::new();
        let task = tokio::spawn(registry.run());

        // Queued behind the shutdown, before the task has run.
        handle.shutdown();
        let queued = FakeSubscriber::new();
        handle.subscribe_admin(queued.clone());
        task.await.unwrap();
        assert!(queued.is_closed());
        assert!(handle.is_closed());

        // Sent after the registry has gone.
        let late = FakeSubscriber::new();
        handle.subscribe_order("1".into(), late.clone());
        assert!(late.is_closed());
        handle.closed().await;
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        #[derive(Debug, Clone)]
        enum Op {
            Subscribe(usize),
            Unsubscribe(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0usize..4).prop_map(Op::Subscribe),
                (0usize..4).prop_map(Op::Unsubscribe),
            ]
        }

        proptest! {
            #[test]
            fn replay_matches_net_membership(ops in proptest::collection::vec(op(), 0..40)) {
                let pool: Vec<_> = (0..4).map(|_| FakeSubscriber::new()).collect();
                let mut registry = Registry::new();
                let mut expected = BTreeSet::new();

                for op in &ops {
                    match *op {
                        Op::Subscribe(i) => {
                            registry.subscribe_order("k".into(), pool[i].clone());
                            expected.insert(pool[i].id());
                        }
                        Op::Unsubscribe(i) => {
                            let removed = registry.unsubscribe_order(&"k".into(), pool[i].id());
                            prop_assert_eq!(removed, expected.remove(&pool[i].id()));
                        }
                    }
                }

                let snapshot = registry.snapshot();
                let actual: BTreeSet<_> = snapshot
                    .orders
                    .get("k")
                    .map(|ids| ids.iter().copied().collect())
                    .unwrap_or_default();
                prop_assert_eq!(&actual, &expected);
                prop_assert_eq!(snapshot.has_order_channel("k"), !expected.is_empty());

                let delivered = registry.publish_to_order(&"k".into(), preparing("k"));
                prop_assert_eq!(delivered, expected.len());
            }
        }
    }
}
