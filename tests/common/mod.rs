//! Shared helpers for integration tests: a local HTTP server to aim the
//! `request` tool at.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Echo back what the server received.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({
        "method": method.as_str(),
        "body": body,
        "content_type": content_type,
        "authorization": auth,
    }))
}

fn router() -> Router {
    Router::new()
        .route(
            "/ok",
            get(|| async { (StatusCode::OK, [("x-test", "yes")], "hello") }),
        )
        .route(
            "/created",
            post(|| async { (StatusCode::CREATED, "made") }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "nope") }),
        )
        .route(
            "/boom",
            any(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/echo", any(echo))
}

/// Spin up the test HTTP server on a random port.
pub async fn spawn_http_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
