//! Request extractors: who is calling, and bodies that arrive either as
//! browser forms or as JSON.

use super::error::AppError;
use super::AppState;
use crate::model::{Session, SessionId};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sid";

/// A body decoded as JSON when the request says so, otherwise as a URL-encoded form.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::api(StatusCode::BAD_REQUEST, e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::api(StatusCode::BAD_REQUEST, e.body_text()))?;
            Ok(Self(value))
        }
    }
}

async fn current_session(parts: &Parts, state: &AppState) -> Result<Option<Session>, AppError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let id = SessionId::from(cookie.value().to_string());
    Ok(state.sessions.resolve(id).await?)
}

/// The signed-in user, if any. Never rejects on a missing session.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Session>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(current_session(parts, state).await?))
    }
}

/// A signed-in user. Anonymous callers are sent to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Session);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        current_session(parts, state)
            .await?
            .map(Self)
            .ok_or(AppError::LoginRequired)
    }
}

/// A signed-in admin. Everyone else, anonymous callers included, gets a 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Session);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match current_session(parts, state).await? {
            Some(session) if session.is_admin() => Ok(Self(session)),
            _ => Err(AppError::AdminOnly),
        }
    }
}
