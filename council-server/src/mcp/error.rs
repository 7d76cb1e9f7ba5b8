use serde_json::json;
use thiserror::Error;

use super::types::MCPError;

/// Standard JSON-RPC error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Every way a single request can fail. All of them are reported back to the
/// caller inside the response envelope; none of them stop the server.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    MalformedEnvelope(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid arguments: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RpcResult<T> = Result<T, RpcError>;

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            RpcError::Parse(_) => error_codes::PARSE_ERROR,
            RpcError::MalformedEnvelope(_) => error_codes::INVALID_REQUEST,
            RpcError::MethodNotFound(_) | RpcError::ToolNotFound(_) => {
                error_codes::METHOD_NOT_FOUND
            }
            RpcError::InvalidParams(_)
            | RpcError::ResourceNotFound(_)
            | RpcError::Validation(_) => error_codes::INVALID_PARAMS,
            RpcError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    pub fn to_error_object(&self) -> MCPError {
        let data = match self {
            RpcError::ToolNotFound(name) => Some(json!({ "tool": name })),
            RpcError::ResourceNotFound(uri) => Some(json!({ "uri": uri })),
            RpcError::Validation(violations) => Some(json!({ "violations": violations })),
            _ => None,
        };

        MCPError {
            code: self.code(),
            message: self.to_string(),
            data,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_fixed_enumeration() {
        assert_eq!(RpcError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(RpcError::ToolNotFound("x".into()).code(), -32601);
        assert_eq!(RpcError::ResourceNotFound("x".into()).code(), -32602);
        assert_eq!(RpcError::Validation(vec![]).code(), -32602);
        assert_eq!(RpcError::InvalidParams("x".into()).code(), -32602);
        assert_eq!(RpcError::Internal("x".into()).code(), -32603);
        assert_eq!(RpcError::MalformedEnvelope("x".into()).code(), -32600);
        assert_eq!(RpcError::Parse("x".into()).code(), -32700);
    }

    #[test]
    fn validation_lists_every_violation() {
        let err = RpcError::Validation(vec!["first".into(), "second".into()]);
        let object = err.to_error_object();
        assert_eq!(object.message, "Invalid arguments: first; second");
        assert_eq!(object.data.unwrap()["violations"][1], "second");
    }

    #[test]
    fn resource_not_found_carries_uri() {
        let object = RpcError::ResourceNotFound("app://nope".into()).to_error_object();
        assert_eq!(object.data.unwrap()["uri"], "app://nope");
    }
}
