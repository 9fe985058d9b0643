//! What gets published after a successful write.
//!
//! Handlers call these only after the store has committed. Each call just
//! enqueues on the registry, so it cannot delay or fail the response.

use super::{Event, RegistryHandle};
use crate::model::{ContactMessage, Order};
use tracing::debug;

#[derive(Clone)]
pub struct Notifier {
    registry: RegistryHandle,
}

impl Notifier {
    pub fn new(registry: RegistryHandle) -> Self {
        Self { registry }
    }

    /// Tells the order's viewers and every admin dashboard.
    pub fn order_status_changed(&self, order: &Order) {
        debug!(order_id = %order.id, status = %order.status, "Notify status-update");
        let event = Event::status_update(&order.id, order.status);
        self.registry.publish_to_order(order.id.clone(), event.clone());
        self.registry.publish_to_admins(event);
    }

    pub fn order_placed(&self, order: &Order) {
        debug!(order_id = %order.id, "Notify new-order");
        self.registry.publish_to_admins(Event::new_order(order));
    }

    pub fn contact_received(&self, message: &ContactMessage) {
        debug!(contact_id = %message.id, "Notify new-contact");
        self.registry.publish_to_admins(Event::new_contact(message));
    }
}
