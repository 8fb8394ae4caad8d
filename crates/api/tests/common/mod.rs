//! Shared helpers for API integration tests.
//!
//! Tests drive the full router through `tower::ServiceExt::oneshot` against
//! a seeded in-memory store, so no database is required. The router is
//! `Clone` and clones share the same store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tracker_core::crud::CrudService;
use tracker_core::memory::MemoryStore;

use tracker_api::config::ServerConfig;
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
    }
}

/// Build the full application router over a fresh, seeded in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub async fn build_test_app() -> Router {
    let config = test_config();
    let store = MemoryStore::with_seed_data().await.unwrap();
    let state = AppState {
        crud: CrudService::with_system_clock(Arc::new(store)),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// POST raw bytes as JSON, for malformed-body tests.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a row and return its JSON representation.
pub async fn create(app: &Router, resource: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), &format!("/api/v1/{resource}"), body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "creating {resource} failed"
    );
    body_json(response).await
}

/// An RFC 3339 timestamp `minutes` in the past.
pub fn minutes_ago(minutes: i64) -> String {
    (chrono::Utc::now() - chrono::Duration::minutes(minutes)).to_rfc3339()
}
