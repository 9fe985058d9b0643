use super::error::AppError;
use super::extract::{AdminUser, FormOrJson};
use super::AppState;
use crate::contact_actor::ContactError;
use crate::model::{ContactMessage, ContactMessageCreate, ContactMessageId};
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use resource_store::ActorClient;
use serde_json::{json, Value};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit))
        .route("/admin/contacts", get(admin_list))
        .route("/admin/contacts/respond/{id}", get(respond))
        .route("/admin/contacts/delete/{id}", get(remove))
}

async fn submit(
    State(state): State<AppState>,
    FormOrJson(params): FormOrJson<ContactMessageCreate>,
) -> Result<Json<Value>, AppError> {
    let message = state.contacts.submit(params).await?;
    info!(contact_id = %message.id, "Contact message received");
    state.notifier.contact_received(&message);
    Ok(Json(json!({ "message": "Message received", "id": message.id })))
}

async fn admin_list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    Ok(Json(state.contacts.newest_first().await?))
}

async fn respond(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<ContactMessageId>,
) -> Result<Redirect, AppError> {
    state.contacts.mark_responded(id).await?;
    Ok(Redirect::to("/admin/contacts"))
}

async fn remove(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<ContactMessageId>,
) -> Result<Redirect, AppError> {
    match state.contacts.delete(id).await {
        Ok(()) | Err(ContactError::NotFound(_)) => Ok(Redirect::to("/admin/contacts")),
        Err(e) => Err(e.into()),
    }
}
