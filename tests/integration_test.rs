//! End-to-end flows through the router with every real actor running.

use axum::body::{Body, BodyDataStream};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures::StreamExt;
use oldrao::config::Config;
use oldrao::http;
use oldrao::lifecycle::RestaurantSystem;
use oldrao::model::Role;
use serde_json::Value;
use tower::ServiceExt;

fn order_request(name: &str) -> Request<Body> {
    let body = serde_json::json!({
        "items": [{ "id": "m1", "name": "Chole Bhature", "price": 150.0, "qty": 1 }],
        "total": 150.0,
        "name": name,
        "phone": "98100 00000",
        "address": "1 Mall Road",
        "payment": "upi",
    });
    Request::post("/order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = Request::get(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    request.body(Body::empty()).unwrap()
}

async fn json(app: &Router, request: Request<Body>) -> Value {
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Next SSE frame, skipping keep-alive comments.
async fn next_event(body: &mut BodyDataStream) -> Option<(String, Value)> {
    loop {
        let chunk = body.next().await?.ok()?;
        let text = String::from_utf8(chunk.to_vec()).ok()?;
        let mut name = None;
        let mut data = None;
        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("event: ") {
                name = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("data: ") {
                data = serde_json::from_str(rest).ok();
            }
        }
        if let (Some(name), Some(data)) = (name, data) {
            return Some((name, data));
        }
    }
}

async fn open_stream(app: &Router, uri: &str, cookie: Option<&str>) -> BodyDataStream {
    let response = app.clone().oneshot(get(uri, cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.into_body().into_data_stream()
}

async fn admin_cookie(system: &RestaurantSystem) -> String {
    system
        .users
        .register(
            "Chef".into(),
            "chef@oldrao.in".into(),
            "tandoor".into(),
            Role::Admin,
        )
        .await
        .unwrap();
    let admin = system
        .users
        .authenticate("chef@oldrao.in", "tandoor".into())
        .await
        .unwrap();
    let sid = system
        .sessions
        .open(&admin, chrono::Duration::hours(1))
        .await
        .unwrap();
    format!("sid={}", sid.as_str())
}

#[tokio::test]
async fn status_change_flows_from_admin_to_viewer_and_dashboard() {
    let system = RestaurantSystem::start(16);
    let app = http::router(system.app_state(&Config::default()), "public");
    let admin = admin_cookie(&system).await;

    let mut dashboard = open_stream(&app, "/events/admin/orders", Some(&admin)).await;
    let (name, data) = next_event(&mut dashboard).await.unwrap();
    assert_eq!(name, "connected");
    assert_eq!(data["channel"], "admin");

    let placed = json(&app, order_request("Asha")).await;
    let id = placed["id"].as_str().unwrap().to_string();

    let (name, data) = next_event(&mut dashboard).await.unwrap();
    assert_eq!(name, "new-order");
    assert_eq!(data["id"], id.as_str());
    assert_eq!(data["total"], 150.0);
    assert!(data["createdAt"].is_string());

    let mut viewer = open_stream(&app, &format!("/events/order/{id}"), None).await;
    assert_eq!(next_event(&mut viewer).await.unwrap().0, "connected");

    let response = app
        .clone()
        .oneshot(get(
            &format!("/admin/orders/update/{id}?status=Completed"),
            Some(&admin),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    for stream in [&mut viewer, &mut dashboard] {
        let (name, data) = next_event(stream).await.unwrap();
        assert_eq!(name, "status-update");
        assert_eq!(data, serde_json::json!({ "id": id, "status": "Completed" }));
    }

    let status = json(&app, get(&format!("/api/order-status/{id}"), None)).await;
    assert_eq!(status["status"], "Completed");
}

#[tokio::test]
async fn viewers_only_hear_about_their_own_order() {
    let system = RestaurantSystem::start(16);
    let app = http::router(system.app_state(&Config::default()), "public");
    let admin = admin_cookie(&system).await;

    let first = json(&app, order_request("Asha")).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let second = json(&app, order_request("Ravi")).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let mut watching_first = open_stream(&app, &format!("/events/order/{first}"), None).await;
    next_event(&mut watching_first).await.unwrap();

    for (id, status) in [(&second, "Preparing"), (&first, "Cancelled")] {
        let response = app
            .clone()
            .oneshot(get(
                &format!("/admin/orders/update/{id}?status={status}"),
                Some(&admin),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    // The first frame after `connected` is the update for the watched order.
    let (name, data) = next_event(&mut watching_first).await.unwrap();
    assert_eq!(name, "status-update");
    assert_eq!(data["id"], first.as_str());
    assert_eq!(data["status"], "Cancelled");
}

#[tokio::test]
async fn concurrent_checkouts_each_reach_the_dashboard_once() {
    let system = RestaurantSystem::start(16);
    let app = http::router(system.app_state(&Config::default()), "public");
    let admin = admin_cookie(&system).await;
    let mut dashboard = open_stream(&app, "/events/admin/orders", Some(&admin)).await;
    next_event(&mut dashboard).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..10 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            json(&app, order_request(&format!("Guest {i}"))).await["id"]
                .as_str()
                .unwrap()
                .to_string()
        }));
    }
    let mut placed = Vec::new();
    for task in tasks {
        placed.push(task.await.unwrap());
    }

    let mut announced = Vec::new();
    for _ in 0..placed.len() {
        let (name, data) = next_event(&mut dashboard).await.unwrap();
        assert_eq!(name, "new-order");
        announced.push(data["id"].as_str().unwrap().to_string());
    }
    placed.sort();
    announced.sort();
    assert_eq!(placed, announced);
}

#[tokio::test]
async fn shutdown_ends_open_streams() {
    let system = RestaurantSystem::start(16);
    let app = http::router(system.app_state(&Config::default()), "public");

    let mut viewer = open_stream(&app, "/events/order/507f", None).await;
    assert_eq!(next_event(&mut viewer).await.unwrap().0, "connected");

    drop(app);
    system.shutdown().await.unwrap();
    assert!(viewer.next().await.is_none());
}
