use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use council_server::http::build_router;
use council_server::mcp::MCPServer;

fn app() -> axum::Router {
    build_router(Arc::new(MCPServer::default()))
}

async fn post(uri: &str, body: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1 << 20).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 8192).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_liveness() {
    for uri in ["/health", "/"] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "service": "your-ai-council"}));
    }
}

#[tokio::test]
async fn initialize_over_http() {
    let (status, text) = post(
        "/mcp",
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(body["result"]["serverInfo"]["name"], "your-ai-council");
}

#[tokio::test]
async fn root_path_accepts_envelopes() {
    let (status, text) = post("/", r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn initialized_notification_has_no_body() {
    let (status, text) = post(
        "/mcp",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(text.is_empty());
}

#[tokio::test]
async fn rpc_errors_use_http_success() {
    let (status, text) = post("/mcp", r#"{"jsonrpc":"2.0","id":9,"method":"nope"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["id"], 9);
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn garbage_body_is_parse_error() {
    let (status, text) = post("/mcp", "not json").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["error"]["code"], -32700);
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/mcp")
        .header("origin", "https://chat.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
