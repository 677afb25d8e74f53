//! Shared helpers for the server integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;

use carteira_server::{api::app_router, build_state, config::Config, AppState};

pub const JWT_SECRET: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        jwt_secret: JWT_SECRET.to_vec(),
        token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
    }
}

pub async fn build_test_state() -> (Arc<AppState>, Config, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let state = build_state(&config).await.unwrap();
    (state, config, dir)
}

pub async fn build_test_app() -> (Router, TempDir) {
    let (state, config, dir) = build_test_state().await;
    (app_router(state, &config), dir)
}

/// Sends a JSON POST and returns the status plus the parsed JSON body.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let (status, text) = post_json_text(app, uri, body, token).await;
    let json = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Sends a JSON POST and returns the status plus the raw body text
/// (for streaming responses).
pub async fn post_json_text(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> (StatusCode, String) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Registers a user and returns their bearer token.
pub async fn register_user(app: &Router, email: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({
            "name": "João Silva",
            "email": email,
            "password": "123456",
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
