//! HTTP transport: JSON-RPC envelopes over `POST /mcp`, liveness on
//! `GET /health`.
//!
//! RPC-level failures always travel inside a 200 response; the HTTP status
//! only distinguishes "reply" (200) from "nothing to say" (204).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::mcp::MCPServer;

#[derive(Debug, Error)]
pub enum HttpTransportError {
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub server: Arc<MCPServer>,
}

pub fn build_router(server: Arc<MCPServer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_health).post(handle_mcp))
        .route("/health", get(handle_health))
        .route("/mcp", post(handle_mcp))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { server })
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "your-ai-council"}))
}

async fn handle_mcp(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("Received {} byte MCP message", body.len());

    match state.server.handle_message(&body) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn run_http_server(server: Arc<MCPServer>, addr: &str) -> Result<(), HttpTransportError> {
    info!("Starting HTTP server...");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| HttpTransportError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;

    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, build_router(server))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received, stopping...");
        })
        .await?;

    Ok(())
}
