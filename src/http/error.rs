//! HTTP error handling.
//!
//! API routes answer with JSON `{ "error": ... }`; page-style routes answer
//! with a short plain-text message the way the browser forms expect.

use crate::contact_actor::ContactError;
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use crate::reservation_actor::ReservationError;
use crate::session_actor::SessionError;
use crate::user_actor::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

pub const ADMIN_ONLY: &str = "Access Denied — Admins Only";

#[derive(Debug, Error)]
pub enum AppError {
    /// JSON error body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Plain-text error body.
    #[error("{message}")]
    Page { status: StatusCode, message: String },

    /// No session: send the browser to the login page.
    #[error("login required")]
    LoginRequired,

    #[error("Access Denied — Admins Only")]
    AdminOnly,

    /// Logged with its cause; the client only sees a generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn page(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Page {
            status,
            message: message.into(),
        }
    }

    pub fn internal(cause: impl Display) -> Self {
        AppError::Internal(cause.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Api { status, message } => {
                (status, Json(json!({ "error": message }))).into_response()
            }
            AppError::Page { status, message } => (status, message).into_response(),
            AppError::LoginRequired => Redirect::to("/login").into_response(),
            AppError::AdminOnly => (StatusCode::FORBIDDEN, ADMIN_ONLY).into_response(),
            AppError::Internal(cause) => {
                error!(%cause, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

// Default mappings for page-style routes; API handlers map their own messages.

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(_) => AppError::page(StatusCode::NOT_FOUND, "Menu item not found"),
            MenuError::ValidationError(msg) => AppError::page(StatusCode::BAD_REQUEST, msg),
            other => AppError::internal(other),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => AppError::page(StatusCode::NOT_FOUND, "Order not found"),
            OrderError::ValidationError(msg) => AppError::page(StatusCode::BAD_REQUEST, msg),
            other => AppError::internal(other),
        }
    }
}

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        match e {
            ReservationError::NotFound(_) => {
                AppError::page(StatusCode::NOT_FOUND, "Reservation not found")
            }
            ReservationError::ValidationError(msg) => AppError::page(StatusCode::BAD_REQUEST, msg),
            other => AppError::internal(other),
        }
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        match e {
            ContactError::NotFound(_) => {
                AppError::page(StatusCode::NOT_FOUND, "Message not found")
            }
            ContactError::ValidationError(msg) => AppError::api(StatusCode::BAD_REQUEST, msg),
            other => AppError::internal(other),
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => AppError::page(StatusCode::NOT_FOUND, "User not found!"),
            UserError::AlreadyExists(_) => {
                AppError::page(StatusCode::CONFLICT, "User already exists!")
            }
            UserError::IncorrectPassword => {
                AppError::page(StatusCode::UNAUTHORIZED, "Incorrect password!")
            }
            UserError::ValidationError(msg) => AppError::page(StatusCode::BAD_REQUEST, msg),
            other => AppError::internal(other),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::internal(e)
    }
}
