use super::error::AppError;
use super::extract::{AdminUser, FormOrJson};
use super::AppState;
use crate::model::{Reservation, ReservationCreate, ReservationId, ReservationStatus};
use crate::reservation_actor::ReservationError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use resource_store::ActorClient;
use tracing::info;

const SUCCESS_PAGE: &str = "<h2>Reservation Successful!</h2><a href='/'>Back Home</a>";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservation", post(book))
        .route("/reservation/success", get(success))
        .route("/admin/reservations", get(admin_list))
        .route("/admin/reservations/{action}/{id}", get(manage))
}

async fn book(
    State(state): State<AppState>,
    FormOrJson(params): FormOrJson<ReservationCreate>,
) -> Result<Redirect, AppError> {
    let id = state.reservations.book(params).await?;
    info!(reservation_id = %id, "Table booked");
    Ok(Redirect::to("/reservation/success"))
}

async fn success() -> Html<&'static str> {
    Html(SUCCESS_PAGE)
}

async fn admin_list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(state.reservations.by_date().await?))
}

async fn manage(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((action, id)): Path<(String, ReservationId)>,
) -> Result<Redirect, AppError> {
    let status = match action.as_str() {
        "confirm" => ReservationStatus::Confirmed,
        "complete" => ReservationStatus::Completed,
        "cancel" => ReservationStatus::Cancelled,
        "delete" => {
            match state.reservations.delete(id).await {
                Ok(()) | Err(ReservationError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(Redirect::to("/admin/reservations"));
        }
        other => {
            return Err(AppError::page(
                StatusCode::NOT_FOUND,
                format!("Unknown reservation action: {other}"),
            ))
        }
    };
    state.reservations.set_status(id, status).await?;
    Ok(Redirect::to("/admin/reservations"))
}
