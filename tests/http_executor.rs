//! ReqwestExecutor against a local axum server.

mod common;

use std::collections::BTreeMap;
use std::time::Duration;

use mcp_rest_apis::tools::{HttpExecutor, HttpMethod, HttpRequest, ReqwestExecutor};
use mcp_rest_apis::types::HttpConfig;
use mcp_rest_apis::Error;
use serde_json::Value;

fn executor() -> ReqwestExecutor {
    ReqwestExecutor::new(&HttpConfig {
        timeout: Duration::from_secs(5),
        user_agent: "mcprestapis-tests".to_string(),
    })
    .unwrap()
}

fn request(method: HttpMethod, url: String, body: Option<&str>) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: BTreeMap::new(),
        body: body.map(str::to_string),
    }
}

#[tokio::test]
async fn test_success_returns_status_body_and_headers() {
    let addr = common::spawn_http_server().await;

    let outcome = executor()
        .execute(request(HttpMethod::Get, format!("http://{addr}/ok"), None))
        .await
        .unwrap();

    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.data, "hello");
    assert_eq!(outcome.headers.get("x-test").map(String::as_str), Some("yes"));
}

#[tokio::test]
async fn test_any_2xx_is_success() {
    let addr = common::spawn_http_server().await;

    let outcome = executor()
        .execute(request(HttpMethod::Post, format!("http://{addr}/created"), None))
        .await
        .unwrap();

    assert_eq!(outcome.status, 201);
    assert_eq!(outcome.data, "made");
}

#[tokio::test]
async fn test_404_is_request_error_with_status() {
    let addr = common::spawn_http_server().await;

    let err = executor()
        .execute(request(HttpMethod::Get, format!("http://{addr}/missing"), None))
        .await
        .unwrap_err();

    match err {
        Error::Request { status, .. } => assert_eq!(status, Some(404)),
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_never_sends_body() {
    let addr = common::spawn_http_server().await;

    let outcome = executor()
        .execute(request(
            HttpMethod::Get,
            format!("http://{addr}/echo"),
            Some("{\"secret\":true}"),
        ))
        .await
        .unwrap();

    let echoed: Value = serde_json::from_str(&outcome.data).unwrap();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["body"], "");
    assert_eq!(echoed["content_type"], Value::Null);
}

#[tokio::test]
async fn test_delete_never_sends_body() {
    let addr = common::spawn_http_server().await;

    let outcome = executor()
        .execute(request(
            HttpMethod::Delete,
            format!("http://{addr}/echo"),
            Some("{\"id\":1}"),
        ))
        .await
        .unwrap();

    let echoed: Value = serde_json::from_str(&outcome.data).unwrap();
    assert_eq!(echoed["method"], "DELETE");
    assert_eq!(echoed["body"], "");
}

#[tokio::test]
async fn test_post_sends_json_body_and_caller_headers() {
    let addr = common::spawn_http_server().await;

    let mut req = request(
        HttpMethod::Post,
        format!("http://{addr}/echo"),
        Some("{\"name\":\"x\"}"),
    );
    req.headers
        .insert("Authorization".to_string(), "Bearer token".to_string());
    let outcome = executor().execute(req).await.unwrap();

    let echoed: Value = serde_json::from_str(&outcome.data).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["body"], "{\"name\":\"x\"}");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["authorization"], "Bearer token");
}

#[tokio::test]
async fn test_put_sends_body() {
    let addr = common::spawn_http_server().await;

    let outcome = executor()
        .execute(request(HttpMethod::Put, format!("http://{addr}/echo"), Some("[1,2]")))
        .await
        .unwrap();

    let echoed: Value = serde_json::from_str(&outcome.data).unwrap();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["body"], "[1,2]");
}

#[tokio::test]
async fn test_connection_refused_has_no_status() {
    let addr = common::closed_addr().await;

    let err = executor()
        .execute(request(HttpMethod::Get, format!("http://{addr}/"), None))
        .await
        .unwrap_err();

    match err {
        Error::Request { status, .. } => assert_eq!(status, None),
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_url_is_request_error() {
    let err = executor()
        .execute(request(HttpMethod::Get, "not a url".to_string(), None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request { status: None, .. }), "{err:?}");
}
