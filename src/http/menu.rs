//! Menu API and the admin menu editor.

use super::error::AppError;
use super::extract::{AdminUser, FormOrJson};
use super::AppState;
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use resource_store::ActorClient;
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(list))
        .route("/api/menu/{id}", get(show))
        .route("/admin/menu", get(admin_list))
        .route("/admin/menu/add", post(add))
        .route("/admin/menu/delete/{id}", get(remove))
        .route("/admin/menu/edit/{id}", get(edit_form).post(edit))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, AppError> {
    Ok(Json(state.menu.menu().await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItem>, AppError> {
    state
        .menu
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::api(StatusCode::NOT_FOUND, "Menu not found"))
}

async fn admin_list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    Ok(Json(state.menu.menu().await?))
}

async fn add(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    FormOrJson(params): FormOrJson<MenuItemCreate>,
) -> Result<Redirect, AppError> {
    let id = state.menu.add(params).await?;
    info!(menu_id = %id, admin = %admin.user_id, "Menu item added");
    Ok(Redirect::to("/admin/menu"))
}

async fn remove(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Redirect, AppError> {
    match state.menu.delete(id).await {
        Ok(()) | Err(MenuError::NotFound(_)) => Ok(Redirect::to("/admin/menu")),
        Err(e) => Err(e.into()),
    }
}

async fn edit_form(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItem>, AppError> {
    let id_text = id.to_string();
    Ok(Json(
        state
            .menu
            .get(id)
            .await?
            .ok_or(MenuError::NotFound(id_text))?,
    ))
}

async fn edit(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
    FormOrJson(update): FormOrJson<MenuItemUpdate>,
) -> Result<Redirect, AppError> {
    state.menu.edit(id, update).await?;
    Ok(Redirect::to("/admin/menu"))
}
