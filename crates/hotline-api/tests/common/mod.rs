#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use hotline_api::auth::{AppState, AppStateInner};
use hotline_api::config::Config;
use hotline_api::routes::router;
use hotline_db::Store;

pub const ADMIN_PASSWORD: &str = "4499";
pub const TEST_SECRET: &str = "integration-test-secret";

/// Router over a fresh store with the default (open) configuration.
pub fn app() -> Router {
    app_with(Config::default())
}

/// Router that demands bearer tokens on everything but login/signup.
pub fn locked_app() -> Router {
    app_with(Config {
        jwt_secret: TEST_SECRET.into(),
        require_token: true,
        ..Config::default()
    })
}

pub fn app_with(config: Config) -> Router {
    app_and_state(config).0
}

/// Router plus a handle on its state, for tests that reach into the store.
pub fn app_and_state(config: Config) -> (Router, AppState) {
    let store = Store::open(&config.admin);
    let state = AppStateInner::new(store, &config);
    (router(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body), None).await
}

/// Signs up a user and returns its JSON record.
pub async fn signup(app: &Router, name: &str, password: &str) -> Value {
    let (status, body) = post(
        app,
        "/api/auth/signup",
        serde_json::json!({ "name": name, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {body}");
    body["user"].clone()
}
