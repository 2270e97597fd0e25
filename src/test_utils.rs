use crate::{
    app,
    config::{DbConfig, RuntimeConfiguration},
    state::RosterState,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;

///the `TempDir` has to outlive the state, or the database file disappears underneath it
pub async fn test_state() -> (RosterState, TempDir) {
    let dir = TempDir::new().expect("unable to create temp dir");
    let config = RuntimeConfiguration::for_database(DbConfig::at(dir.path().join("roster.db")));
    let state = RosterState::new(SqlitePoolOptions::new(), config)
        .await
        .expect("unable to create state");
    (state, dir)
}

pub async fn test_app() -> (Router, TempDir) {
    let (state, dir) = test_state().await;
    (app(state), dir)
}

///non-JSON responses come back as a JSON string holding the raw body
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map_or_else(Body::empty, Body::from))
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));

    let response = match app.clone().oneshot(request).await {
        Ok(response) => response,
        Err(err) => panic!("router request failed: {err}"),
    };
    let status = response.status();

    let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(err) => panic!("failed to read response body: {err}"),
    };
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}
