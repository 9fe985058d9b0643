//! Sign-up, login/logout and the profile page.

use super::error::AppError;
use super::extract::{CurrentUser, FormOrJson, SESSION_COOKIE};
use super::AppState;
use crate::model::{Role, SessionId, User, UserUpdate};
use crate::user_actor::UserError;
use axum::extract::State;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use resource_store::ActorClient;
use serde::Deserialize;
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/profile", get(profile))
        .route("/profile/update", post(update_profile))
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

async fn signup(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<SignupForm>,
) -> Result<Redirect, AppError> {
    state
        .users
        .register(form.name, form.email, form.password, Role::Customer)
        .await?;
    Ok(Redirect::to("/login"))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    FormOrJson(form): FormOrJson<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = state.users.authenticate(&form.email, form.password).await?;
    let sid = state.sessions.open(&user, state.session_ttl).await?;
    info!(user_id = %user.id, role = ?user.role, "Logged in");

    let cookie = Cookie::build((SESSION_COOKIE, sid.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    Ok((jar.add(cookie), Redirect::to("/")))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state
            .sessions
            .close(SessionId::from(cookie.value().to_string()))
            .await?;
    }
    Ok((
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/"),
    ))
}

async fn profile(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<User>, AppError> {
    let id_text = session.user_id.to_string();
    let user = state
        .users
        .get(session.user_id)
        .await?
        .ok_or(UserError::NotFound(id_text))?;
    Ok(Json(user))
}

async fn update_profile(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
    FormOrJson(update): FormOrJson<UserUpdate>,
) -> Result<Redirect, AppError> {
    state.users.update_profile(session.user_id, update).await?;
    Ok(Redirect::to("/profile"))
}
