//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders are validated against the user actor on creation: an order that
//! names a user must name one that exists. Guest orders (`user: None`) skip
//! the check.

use super::{OrderAction, OrderActionResult, OrderError};
use crate::clients::UserClient;
use crate::model::{optional, required, Order, OrderCreate, OrderId, OrderLine, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{ActorClient, ActorEntity};
use tracing::debug;

fn validate_line(mut line: OrderLine) -> Result<OrderLine, OrderError> {
    line.name = required("item name", line.name).map_err(OrderError::ValidationError)?;
    if !line.price.is_finite() || line.price < 0.0 {
        return Err(OrderError::ValidationError(format!(
            "invalid price for {}: {}",
            line.name, line.price
        )));
    }
    if line.qty == 0 {
        return Err(OrderError::ValidationError(format!(
            "quantity for {} must be at least 1",
            line.name
        )));
    }
    line.img = optional(line.img);
    Ok(line)
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = UserClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "order must contain at least one item".to_string(),
            ));
        }
        if !params.total.is_finite() || params.total < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "invalid total: {}",
                params.total
            )));
        }
        let items = params
            .items
            .into_iter()
            .map(validate_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            items,
            total: params.total,
            user: params.user,
            name: required("name", params.name).map_err(OrderError::ValidationError)?,
            phone: params.phone.trim().to_string(),
            address: params.address.trim().to_string(),
            payment: params.payment.trim().to_string(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    async fn on_create(&mut self, users: &UserClient) -> Result<(), OrderError> {
        let Some(user_id) = &self.user else {
            return Ok(());
        };
        debug!(%user_id, "Checking order owner");
        match users.get(user_id.clone()).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::InvalidUser(user_id.to_string())),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, _update: (), _users: &UserClient) -> Result<(), OrderError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _users: &UserClient,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::SetStatus(status) => {
                self.status = status;
                Ok(OrderActionResult::SetStatus(self.clone()))
            }
        }
    }
}
