//! # HTTP Surface
//!
//! Axum routes over the resource clients. Handlers that change an order or
//! receive a contact message call the [`Notifier`] after the write commits.
//!
//! - [`menu`], [`orders`], [`reservations`], [`contacts`], [`account`] - CRUD routes
//! - [`events`] - the two server-sent event streams
//! - [`extract`] - session and body extractors
//! - [`error`] - [`AppError`](error::AppError) and its response mapping
//!
//! Pages render as JSON; templating is left to the static front end served
//! from `public_dir`.

pub mod account;
pub mod contacts;
pub mod error;
pub mod events;
pub mod extract;
pub mod menu;
pub mod orders;
pub mod reservations;

use crate::clients::{
    ContactClient, MenuClient, OrderClient, ReservationClient, SessionClient, UserClient,
};
use crate::events::{Notifier, RegistryHandle, StreamSettings};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Everything a handler can reach. Cheap to clone: every field is a handle.
#[derive(Clone)]
pub struct AppState {
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub reservations: ReservationClient,
    pub users: UserClient,
    pub contacts: ContactClient,
    pub sessions: SessionClient,
    pub registry: RegistryHandle,
    pub notifier: Notifier,
    pub stream_settings: StreamSettings,
    pub session_ttl: chrono::Duration,
}

pub fn router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(menu::routes())
        .merge(orders::routes())
        .merge(reservations::routes())
        .merge(contacts::routes())
        .merge(account::routes())
        .merge(events::routes())
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Response {
    match state.registry.snapshot().await {
        Some(snapshot) => Json(json!({
            "status": "ok",
            "orderChannels": snapshot.channel_count(),
            "adminSubscribers": snapshot.admin_subscriber_count(),
        }))
        .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "stopping" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::{Channel, EventKind, SubscriptionStream};
    use crate::lifecycle::RestaurantSystem;
    use crate::model::{Category, MenuItemCreate, OrderStatus, Role};
    use axum::body::Body;
    use axum::http::{header, Request};
    use futures::StreamExt;
    use resource_store::ActorClient;
    use serde_json::Value;
    use tower::ServiceExt;

    struct Harness {
        system: RestaurantSystem,
        state: AppState,
    }

    impl Harness {
        fn new() -> Self {
            let system = RestaurantSystem::start(16);
            let state = system.app_state(&Config::default());
            Self { system, state }
        }

        fn app(&self) -> Router {
            router(self.state.clone(), "does-not-exist")
        }

        /// Registers an account and returns a `Cookie` header value for it.
        async fn login_as(&self, email: &str, role: Role) -> String {
            self.system
                .users
                .register("Tester".into(), email.into(), "secret".into(), role)
                .await
                .unwrap();
            let user = self
                .system
                .users
                .authenticate(email, "secret".into())
                .await
                .unwrap();
            let sid = self
                .system
                .sessions
                .open(&user, chrono::Duration::hours(1))
                .await
                .unwrap();
            format!("sid={}", sid.as_str())
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn order_json() -> Request<Body> {
        let body = r#"{
            "items": [{ "id": "m1", "name": "Dal Makhani", "price": 180.0, "qty": 2 }],
            "total": 360.0,
            "name": "Asha",
            "phone": "98100 00000",
            "address": "1 Mall Road",
            "payment": "cod"
        }"#;
        Request::post("/order")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn menu_api_lists_and_looks_up() {
        let h = Harness::new();
        let id = h
            .system
            .menu
            .add(MenuItemCreate {
                name: "Paneer Tikka".into(),
                price: 240.0,
                img: None,
                category: Category::Snacks,
            })
            .await
            .unwrap();

        let response = h.app().oneshot(get("/api/menu")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let items = json_body(response).await;
        assert_eq!(items.as_array().unwrap().len(), 1);
        assert_eq!(items[0]["name"], "Paneer Tikka");

        let response = h
            .app()
            .oneshot(get(&format!("/api/menu/{id}")))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["category"], "snacks");

        let response = h.app().oneshot(get("/api/menu/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "Menu not found");
    }

    #[tokio::test]
    async fn placing_an_order_notifies_admin_streams() {
        let h = Harness::new();
        let mut admin_stream =
            SubscriptionStream::open(&h.state.registry, Channel::Admin, h.state.stream_settings);

        let response = h.app().oneshot(order_json()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Order placed!");
        let id = body["id"].as_str().unwrap().to_string();

        let connected = admin_stream.next().await.unwrap();
        assert_eq!(connected.event().unwrap().kind, EventKind::Connected);
        let frame = admin_stream.next().await.unwrap();
        let event = frame.event().unwrap();
        assert_eq!(event.kind, EventKind::NewOrder);
        assert_eq!(event.payload["id"], id.as_str());
        assert_eq!(event.payload["name"], "Asha");
        assert_eq!(event.payload["status"], "Pending");
    }

    #[tokio::test]
    async fn invalid_order_is_rejected() {
        let h = Harness::new();
        let request = Request::post("/order")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{ "items": [], "total": 0, "name": "Asha" }"#))
            .unwrap();

        let response = h.app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert!(h.system.orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_status_update_reaches_order_viewers() {
        let h = Harness::new();
        let admin = h.login_as("chef@oldrao.in", Role::Admin).await;
        let body = json_body(h.app().oneshot(order_json()).await.unwrap()).await;
        let id = body["id"].as_str().unwrap().to_string();

        let mut viewer = SubscriptionStream::open(
            &h.state.registry,
            Channel::Order(id.clone().into()),
            h.state.stream_settings,
        );

        let response = h
            .app()
            .oneshot(get_with_cookie(
                &format!("/admin/orders/update/{id}?status=Preparing"),
                &admin,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/orders");

        assert_eq!(
            viewer.next().await.unwrap().event().unwrap().kind,
            EventKind::Connected
        );
        let frame = viewer.next().await.unwrap();
        let event = frame.event().unwrap();
        assert_eq!(event.kind, EventKind::StatusUpdate);
        assert_eq!(event.payload["id"], id.as_str());
        assert_eq!(event.payload["status"], "Preparing");

        let order = h.system.orders.get(id.into()).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn unknown_status_is_a_bad_request() {
        let h = Harness::new();
        let admin = h.login_as("chef@oldrao.in", Role::Admin).await;
        let body = json_body(h.app().oneshot(order_json()).await.unwrap()).await;
        let id = body["id"].as_str().unwrap().to_string();

        let response = h
            .app()
            .oneshot(get_with_cookie(
                &format!("/admin/orders/update/{id}?status=Burnt"),
                &admin,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_routes_reject_customers_and_strangers() {
        let h = Harness::new();
        let customer = h.login_as("meera@example.com", Role::Customer).await;

        let response = h.app().oneshot(get("/admin/orders")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = h
            .app()
            .oneshot(get_with_cookie("/admin/orders", &customer))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = h
            .app()
            .oneshot(get_with_cookie("/events/admin/orders", &customer))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn login_required_pages_redirect_anonymous_callers() {
        let h = Harness::new();
        for uri in ["/my-orders", "/profile", "/order/123"] {
            let response = h.app().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.headers()[header::LOCATION], "/login");
        }
    }

    #[tokio::test]
    async fn order_page_is_for_owner_and_admins() {
        let h = Harness::new();
        let owner = h.login_as("asha@example.com", Role::Customer).await;
        let stranger = h.login_as("ravi@example.com", Role::Customer).await;
        let admin = h.login_as("chef@oldrao.in", Role::Admin).await;

        let mut request = order_json();
        request
            .headers_mut()
            .insert(header::COOKIE, owner.parse().unwrap());
        let body = json_body(h.app().oneshot(request).await.unwrap()).await;
        let uri = format!("/order/{}", body["id"].as_str().unwrap());

        for cookie in [&owner, &admin] {
            let response = h.app().oneshot(get_with_cookie(&uri, cookie)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let response = h
            .app()
            .oneshot(get_with_cookie(&uri, &stranger))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = h
            .app()
            .oneshot(get_with_cookie("/my-orders", &owner))
            .await
            .unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
        let response = h
            .app()
            .oneshot(get_with_cookie("/my-orders", &stranger))
            .await
            .unwrap();
        assert!(json_body(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn signup_login_logout() {
        let h = Harness::new();
        let form = |uri: &str, body: &'static str| {
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap()
        };

        let response = h
            .app()
            .oneshot(form("/signup", "name=Meera&email=meera%40example.com&password=pw1"))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/login");

        let response = h
            .app()
            .oneshot(form("/signup", "name=Meera&email=MEERA%40example.com&password=pw2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = h
            .app()
            .oneshot(form("/login", "email=meera%40example.com&password=wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = h
            .app()
            .oneshot(form("/login", "email=meera%40example.com&password=pw1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("sid="));
        assert!(set_cookie.contains("HttpOnly"));
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = h
            .app()
            .oneshot(get_with_cookie("/profile", &cookie))
            .await
            .unwrap();
        let profile = json_body(response).await;
        assert_eq!(profile["email"], "meera@example.com");
        assert!(profile.get("passwordHash").is_none());
        assert!(profile.get("password_hash").is_none());

        let response = h
            .app()
            .oneshot(get_with_cookie("/logout", &cookie))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = h
            .app()
            .oneshot(get_with_cookie("/profile", &cookie))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn reservation_form_redirects_to_success() {
        let h = Harness::new();
        let request = Request::post("/reservation")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=Ravi&phone=98100&guests=4&date=2026-11-02&time=19%3A30",
            ))
            .unwrap();

        let response = h.app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/reservation/success");
        assert_eq!(h.system.reservations.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn contact_message_notifies_admins() {
        let h = Harness::new();
        let mut admin_stream =
            SubscriptionStream::open(&h.state.registry, Channel::Admin, h.state.stream_settings);

        let request = Request::post("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{ "name": "Kabir", "email": "kabir@example.com", "message": "Do you cater?" }"#,
            ))
            .unwrap();
        let body = json_body(h.app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["message"], "Message received");

        admin_stream.next().await.unwrap();
        let frame = admin_stream.next().await.unwrap();
        let event = frame.event().unwrap();
        assert_eq!(event.kind, EventKind::NewContact);
        assert_eq!(event.payload["email"], "kabir@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn order_stream_starts_with_connected_then_keeps_alive() {
        let h = Harness::new();
        let mut state = h.state.clone();
        state.stream_settings.heartbeat_interval = std::time::Duration::from_secs(1);
        let app = router(state, "does-not-exist");
        let response = app.oneshot(get("/events/order/507f")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        let mut body = response.into_body().into_data_stream();
        let chunk = body.next().await.unwrap().unwrap();
        let text = String::from_utf8(chunk.to_vec()).unwrap();
        assert!(text.starts_with("event: connected\n"), "{text}");
        assert!(text.contains(r#""channel":"order:507f""#), "{text}");

        let chunk = body.next().await.unwrap().unwrap();
        let text = String::from_utf8(chunk.to_vec()).unwrap();
        let millis = text
            .strip_prefix(": keep-alive ")
            .and_then(|rest| rest.strip_suffix("\n\n"))
            .unwrap_or_else(|| panic!("not a keep-alive comment: {text:?}"));
        assert!(millis.parse::<i64>().is_ok(), "{text:?}");
    }

    #[tokio::test]
    async fn health_reports_registry_state() {
        let h = Harness::new();
        let _viewer = SubscriptionStream::open(
            &h.state.registry,
            Channel::Order("1".into()),
            h.state.stream_settings,
        );

        let response = h.app().oneshot(get("/health")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["orderChannels"], 1);

        h.state.registry.shutdown();
        let response = h.app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
