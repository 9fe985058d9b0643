use crate::model::{Order, OrderStatus};

/// Custom actions for orders.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to the given status. Every transition is allowed.
    SetStatus(OrderStatus),
}

/// Results from [`OrderAction`]s; variants match 1:1.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The order as committed with its new status.
    SetStatus(Order),
}
