// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use hairlens_api::config::Config;
use hairlens_api::db::Database;
use hairlens_api::routes::create_router;
use hairlens_api::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default()).await
}

#[allow(dead_code)]
pub async fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to open in-memory database");
    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Send a JSON request through the router.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sync a user through the API and return the `user` object.
#[allow(dead_code)]
pub async fn sync_user(app: &axum::Router, external_id: &str) -> Value {
    let response = send_json(
        app,
        "POST",
        "/sync",
        Some(serde_json::json!({
            "externalId": external_id,
            "email": format!("{external_id}@example.com"),
            "name": "Test User",
        })),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response).await["user"].clone()
}

/// A submission body with a clear top prediction.
#[allow(dead_code)]
pub fn submission(external_id: &str) -> Value {
    serde_json::json!({
        "externalId": external_id,
        "imageRef": "data:image/jpeg;base64,AAAA",
        "predictions": [
            { "label": "Healthy", "probability": 0.15 },
            { "label": "Dandruff", "probability": 0.8 },
            { "label": "Oily", "probability": 0.05 }
        ]
    })
}
