use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use super::context::ServerContext;
use super::envelope::{parse_envelope, EnvelopeError};
use super::error::RpcError;
use super::handlers::create_router;
use super::router::{Handler, MethodRouter};
use super::types::{MCPRequest, MCPResponse};

pub struct MCPServer {
    pub(crate) context: ServerContext,
    pub(crate) router: MethodRouter,
}

impl MCPServer {
    pub fn new(context: ServerContext) -> Self {
        Self::with_router(context, create_router())
    }

    pub fn with_router(context: ServerContext, router: MethodRouter) -> Self {
        Self { context, router }
    }

    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.router.methods()
    }

    /// Parse and dispatch one raw message. `None` means no reply is due.
    pub fn handle_message(&self, raw: &[u8]) -> Option<MCPResponse> {
        match parse_envelope(raw) {
            Ok(request) => self.handle_request(request),
            Err(EnvelopeError { id, error }) => {
                warn!("Rejected envelope: {}", error);
                debug!("Invalid message content: {}", String::from_utf8_lossy(raw));
                Some(MCPResponse::error(id, &error))
            }
        }
    }

    pub fn handle_request(&self, request: MCPRequest) -> Option<MCPResponse> {
        info!("Handling MCP request: {}", request.method);
        debug!("Request params: {}", request.params);

        let MCPRequest {
            id, method, params, ..
        } = request;

        let route = match self.router.resolve(&method) {
            Ok(route) => route,
            Err(_) if id.is_none() && method.starts_with("notifications/") => {
                debug!("Ignoring unknown notification: {}", method);
                return None;
            }
            Err(e) => {
                warn!("{}", e);
                return Some(MCPResponse::error(id, &e));
            }
        };

        match route.handler {
            Handler::Notification(handler) => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    route
                        .shape
                        .decode(&method, params)
                        .map(|params| handler(&self.context, params))
                }));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!("Notification {} rejected: {}", method, e),
                    Err(panic) => error!(
                        "Notification {} panicked: {}",
                        method,
                        panic_message(panic.as_ref())
                    ),
                }
                None
            }
            Handler::Request(handler) => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    route
                        .shape
                        .decode(&method, params)
                        .and_then(|params| handler(&self.context, params))
                }))
                .unwrap_or_else(|panic| {
                    let message = panic_message(panic.as_ref());
                    error!("Handler for {} panicked: {}", method, message);
                    Err(RpcError::Internal(message))
                });

                Some(match outcome {
                    Ok(result) => MCPResponse::success(id, result),
                    Err(e) => {
                        warn!("Request {} failed: {}", method, e);
                        MCPResponse::error(id, &e)
                    }
                })
            }
        }
    }
}

impl Default for MCPServer {
    fn default() -> Self {
        Self::new(ServerContext::default())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::envelope::{Params, ParamsShape};
    use crate::mcp::error::RpcResult;
    use crate::mcp::router::Route;
    use serde_json::{json, Value};

    fn explode(_ctx: &ServerContext, _params: Params) -> RpcResult<Value> {
        panic!("boom");
    }

    fn fine(_ctx: &ServerContext, _params: Params) -> RpcResult<Value> {
        Ok(json!("fine"))
    }

    fn panicking_server() -> MCPServer {
        MCPServer::with_router(
            ServerContext::default(),
            MethodRouter::new([
                ("explode", Route::request(ParamsShape::Empty, explode)),
                ("fine", Route::request(ParamsShape::Empty, fine)),
            ]),
        )
    }

    #[test]
    fn panic_becomes_internal_error_with_id() {
        let server = panicking_server();
        let response = server
            .handle_message(br#"{"jsonrpc":"2.0","id":"x-9","method":"explode"}"#)
            .unwrap();
        assert_eq!(response.id, Some(json!("x-9")));
        let error = response.error_object().unwrap();
        assert_eq!(error.code, -32603);
        assert!(error.message.contains("boom"));
    }

    #[test]
    fn panic_does_not_affect_later_requests() {
        let server = panicking_server();
        let _ = server.handle_message(br#"{"jsonrpc":"2.0","id":1,"method":"explode"}"#);
        let response = server
            .handle_message(br#"{"jsonrpc":"2.0","id":2,"method":"fine"}"#)
            .unwrap();
        assert_eq!(response.result(), Some(&json!("fine")));
    }

    #[test]
    fn unknown_notification_without_id_is_dropped() {
        let server = MCPServer::default();
        assert!(server
            .handle_message(br#"{"jsonrpc":"2.0","method":"notifications/cancelled"}"#)
            .is_none());
    }

    #[test]
    fn unknown_method_with_id_is_reported() {
        let server = MCPServer::default();
        let response = server
            .handle_message(br#"{"jsonrpc":"2.0","id":3,"method":"notifications/cancelled"}"#)
            .unwrap();
        assert_eq!(response.error_object().unwrap().code, -32601);
    }

    #[test]
    fn parse_error_has_no_id() {
        let response = MCPServer::default().handle_message(b"][").unwrap();
        assert!(response.id.is_none());
        assert_eq!(response.error_object().unwrap().code, -32700);
    }

    #[test]
    fn invalid_params_keep_id() {
        let response = MCPServer::default()
            .handle_message(br#"{"jsonrpc":"2.0","id":5,"method":"resources/read","params":{}}"#)
            .unwrap();
        assert_eq!(response.id, Some(json!(5)));
        assert_eq!(response.error_object().unwrap().code, -32602);
    }
}
