use serde_json::{json, Value};
use tracing::{debug, info};

use super::context::ServerContext;
use super::envelope::{Params, ParamsShape};
use super::error::RpcResult;
use super::router::{MethodRouter, Route};
use super::types::{InitializeResult, ResourcesCapability, ServerCapabilities, ToolsCapability};

pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

pub fn create_router() -> MethodRouter {
    MethodRouter::new([
        (
            "initialize",
            Route::request(ParamsShape::Initialize, handle_initialize),
        ),
        (
            "notifications/initialized",
            Route::notification(ParamsShape::Empty, handle_initialized),
        ),
        ("ping", Route::request(ParamsShape::Empty, handle_ping)),
        (
            "tools/list",
            Route::request(ParamsShape::Empty, handle_tools_list),
        ),
        (
            "tools/call",
            Route::request(ParamsShape::ToolCall, handle_tools_call),
        ),
        (
            "resources/list",
            Route::request(ParamsShape::Empty, handle_resources_list),
        ),
        (
            "resources/read",
            Route::request(ParamsShape::ResourceRead, handle_resources_read),
        ),
    ])
}

pub fn create_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        tools: Some(ToolsCapability {
            list_changed: Some(false),
        }),
        resources: Some(ResourcesCapability {
            list_changed: Some(false),
        }),
    }
}

/// Echo the client's version when we speak it, otherwise offer our latest.
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|version| {
            SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .copied()
                .find(|supported| *supported == version)
        })
        .unwrap_or(LATEST_PROTOCOL_VERSION)
}

fn handle_initialize(ctx: &ServerContext, params: Params) -> RpcResult<Value> {
    let params = params.into_initialize()?;
    info!("Initializing MCP session");

    if let Some(client) = &params.client_info {
        info!(
            "Client: {} {}",
            client.name,
            client.version.as_deref().unwrap_or("")
        );
    }

    let protocol_version = negotiate_protocol_version(params.protocol_version.as_deref());
    debug!(
        "Requested protocol {:?}, answering {}",
        params.protocol_version, protocol_version
    );

    Ok(serde_json::to_value(InitializeResult {
        protocol_version: protocol_version.to_string(),
        capabilities: create_capabilities(),
        server_info: ctx.server_info.clone(),
    })?)
}

fn handle_initialized(_ctx: &ServerContext, _params: Params) {
    info!("Client finished initialization");
}

fn handle_ping(_ctx: &ServerContext, _params: Params) -> RpcResult<Value> {
    Ok(json!({}))
}

fn handle_tools_list(ctx: &ServerContext, _params: Params) -> RpcResult<Value> {
    info!("Listing available tools");

    Ok(json!({
        "tools": ctx.tools.descriptors()
    }))
}

fn handle_tools_call(ctx: &ServerContext, params: Params) -> RpcResult<Value> {
    let call = params.into_tool_call()?;

    info!("Calling tool: {}", call.name);
    debug!("Tool arguments: {}", call.arguments);

    let result = ctx.tools.call(&call.name, call.arguments)?;
    Ok(serde_json::to_value(result)?)
}

fn handle_resources_list(ctx: &ServerContext, _params: Params) -> RpcResult<Value> {
    info!("Listing available resources");

    Ok(json!({
        "resources": ctx.resources.descriptors()
    }))
}

fn handle_resources_read(ctx: &ServerContext, params: Params) -> RpcResult<Value> {
    let read = params.into_resource_read()?;
    let result = ctx.resources.read(&read.uri)?;
    Ok(serde_json::to_value(result)?)
}
