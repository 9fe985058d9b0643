//! # Order Client
//!
//! High-level API for the order actor. Owner validation happens in the order
//! actor's `on_create` hook; this client only shapes requests and results.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, UserId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

impl OrderClient {
    /// Stores a new order and returns it as committed.
    #[instrument(skip(self, params), fields(user = ?params.user))]
    pub async fn place(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "place called");
        info!("Sending create to order actor");
        let id = self.inner.create(params).await?;
        self.inner
            .get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Changes an order's status and returns the updated order.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await?
        {
            OrderActionResult::SetStatus(order) => Ok(order),
        }
    }

    /// Orders placed by `user`, newest first.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .inner
            .find(move |order: &Order| order.belongs_to(&user))
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    /// Every order, newest first.
    #[instrument(skip(self))]
    pub async fn all_newest_first(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        newest_first(&mut orders);
        Ok(orders)
    }
}
