//! The two server-sent event endpoints.
//!
//! Each request opens a [`SubscriptionStream`]; axum drops the stream when the
//! client disconnects, which unsubscribes it.

use super::extract::AdminUser;
use super::AppState;
use crate::events::{Channel, Frame, SubscriptionStream};
use crate::model::OrderId;
use axum::extract::{Path, State};
use axum::response::sse::{Event as SseEvent, Sse};
use axum::routing::get;
use axum::Router;
use futures::{Stream, StreamExt};
use std::convert::Infallible;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/order/{id}", get(order_events))
        .route("/events/admin/orders", get(admin_events))
}

fn to_sse(frame: Frame) -> SseEvent {
    match frame {
        Frame::Event(event) => SseEvent::default().event(event.name()).data(event.data()),
        // On the wire: `: keep-alive <ts>\n\n`.
        Frame::KeepAlive(ts) => SseEvent::default().comment(format!("keep-alive {ts}")),
    }
}

fn sse(stream: SubscriptionStream) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    Sse::new(stream.map(|frame| Ok(to_sse(frame))))
}

/// Any id is accepted; the channel exists only while someone watches it.
async fn order_events(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    sse(SubscriptionStream::open(
        &state.registry,
        Channel::Order(id),
        state.stream_settings,
    ))
}

async fn admin_events(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    sse(SubscriptionStream::open(
        &state.registry,
        Channel::Admin,
        state.stream_settings,
    ))
}
