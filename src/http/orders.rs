//! Checkout, order tracking and the admin order desk.
//!
//! Placing an order and changing its status are the two writes that feed
//! the live event streams; both notify only after the store has committed.

use super::error::AppError;
use super::extract::{AdminUser, CurrentUser, MaybeUser};
use super::AppState;
use crate::model::{Order, OrderCreate, OrderId, OrderLine, OrderStatus};
use crate::order_actor::OrderError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use resource_store::ActorClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/order", post(place))
        .route("/order/{id}", get(show))
        .route("/my-orders", get(my_orders))
        .route("/api/order/{id}", get(api_show))
        .route("/api/order-status/{id}", get(api_status))
        .route("/admin/orders", get(admin_list))
        .route("/admin/orders/update/{id}", get(update_status))
        .route("/admin/orders/details/{id}", get(admin_show))
}

/// Checkout payload sent by the cart page.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment: String,
}

async fn place(
    State(state): State<AppState>,
    MaybeUser(session): MaybeUser,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::api(StatusCode::BAD_REQUEST, e.body_text()))?;
    let params = OrderCreate {
        items: request.items,
        total: request.total,
        user: session.map(|s| s.user_id),
        name: request.name,
        phone: request.phone,
        address: request.address,
        payment: request.payment,
    };

    let order = state.orders.place(params).await.map_err(|e| match e {
        OrderError::ValidationError(msg) => AppError::api(StatusCode::BAD_REQUEST, msg),
        OrderError::InvalidUser(user) => {
            warn!(%user, "Order for unknown user");
            AppError::api(StatusCode::BAD_REQUEST, "Order failed")
        }
        other => {
            error!(error = %other, "Order failed");
            AppError::api(StatusCode::INTERNAL_SERVER_ERROR, "Order failed")
        }
    })?;

    info!(order_id = %order.id, total = order.total, "Order placed");
    state.notifier.order_placed(&order);
    Ok(Json(json!({ "message": "Order placed!", "id": order.id })))
}

async fn api_show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, AppError> {
    state
        .orders
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::api(StatusCode::NOT_FOUND, "Order not found"))
}

async fn api_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Value>, AppError> {
    match state.orders.get(id).await? {
        Some(order) => Ok(Json(json!({ "status": order.status }))),
        None => Err(AppError::api(StatusCode::NOT_FOUND, "Not found")),
    }
}

async fn my_orders(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.for_user(session.user_id).await?))
}

/// Visible to the order's owner and to admins.
async fn show(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Response, AppError> {
    let id_text = id.to_string();
    let order = state
        .orders
        .get(id)
        .await?
        .ok_or(OrderError::NotFound(id_text))?;

    if !session.is_admin() && !order.belongs_to(&session.user_id) {
        warn!(order_id = %order.id, user_id = %session.user_id, "Order access denied");
        return Ok((StatusCode::FORBIDDEN, "Access denied!").into_response());
    }
    Ok(Json(order).into_response())
}

async fn admin_list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.all_newest_first().await?))
}

async fn admin_show(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, AppError> {
    let id_text = id.to_string();
    Ok(Json(
        state
            .orders
            .get(id)
            .await?
            .ok_or(OrderError::NotFound(id_text))?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

async fn update_status(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Query(query): Query<StatusQuery>,
) -> Result<Redirect, AppError> {
    let status: OrderStatus = query
        .status
        .parse()
        .map_err(|msg: String| AppError::page(StatusCode::BAD_REQUEST, msg))?;

    let order = state.orders.set_status(id, status).await?;
    info!(order_id = %order.id, %status, admin = %admin.user_id, "Order status changed");
    state.notifier.order_status_changed(&order);
    Ok(Redirect::to("/admin/orders"))
}
