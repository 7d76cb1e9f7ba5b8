//! Envelope parsing: raw bytes into a validated `MCPRequest`, and untyped
//! params into the per-method `Params` sum type.

use serde_json::{Map, Value};

use super::error::{RpcError, RpcResult};
use super::types::{
    InitializeParams, MCPRequest, ResourceReadParams, ToolCallParams, JSONRPC_VERSION,
};

/// A parse failure together with whatever correlation id could still be read.
#[derive(Debug)]
pub struct EnvelopeError {
    pub id: Option<Value>,
    pub error: RpcError,
}

impl EnvelopeError {
    fn new(id: Option<Value>, error: RpcError) -> Self {
        Self { id, error }
    }
}

pub fn parse_envelope(raw: &[u8]) -> Result<MCPRequest, EnvelopeError> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| EnvelopeError::new(None, RpcError::Parse(e.to_string())))?;

    let Value::Object(mut fields) = value else {
        return Err(EnvelopeError::new(
            None,
            RpcError::MalformedEnvelope("envelope must be a JSON object".to_string()),
        ));
    };

    // Only a missing key means "no id"; an explicit null is echoed back.
    let id = fields.remove("id");

    let jsonrpc = match fields.remove("jsonrpc") {
        None => None,
        Some(Value::String(marker)) if marker == JSONRPC_VERSION => Some(marker),
        Some(other) => {
            return Err(EnvelopeError::new(
                id,
                RpcError::MalformedEnvelope(format!("unsupported jsonrpc marker: {other}")),
            ));
        }
    };

    let method = match fields.remove("method") {
        Some(Value::String(method)) => method,
        Some(_) => {
            return Err(EnvelopeError::new(
                id,
                RpcError::MalformedEnvelope("method must be a string".to_string()),
            ));
        }
        None => {
            return Err(EnvelopeError::new(
                id,
                RpcError::MalformedEnvelope("missing method".to_string()),
            ));
        }
    };

    let params = fields
        .remove("params")
        .filter(|params| !params.is_null())
        .unwrap_or_else(|| Value::Object(Map::new()));

    Ok(MCPRequest {
        jsonrpc,
        id,
        method,
        params,
    })
}

/// Which params type a route expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsShape {
    Initialize,
    Empty,
    ToolCall,
    ResourceRead,
}

#[derive(Debug, Clone)]
pub enum Params {
    Initialize(InitializeParams),
    Empty,
    ToolCall(ToolCallParams),
    ResourceRead(ResourceReadParams),
}

impl ParamsShape {
    pub fn decode(self, method: &str, params: Value) -> RpcResult<Params> {
        if !params.is_object() {
            return Err(RpcError::InvalidParams(format!(
                "{method}: params must be an object"
            )));
        }

        let invalid = |e: serde_json::Error| RpcError::InvalidParams(format!("{method}: {e}"));

        match self {
            ParamsShape::Initialize => serde_json::from_value(params)
                .map(Params::Initialize)
                .map_err(invalid),
            ParamsShape::Empty => Ok(Params::Empty),
            ParamsShape::ToolCall => serde_json::from_value(params)
                .map(Params::ToolCall)
                .map_err(invalid),
            ParamsShape::ResourceRead => serde_json::from_value(params)
                .map(Params::ResourceRead)
                .map_err(invalid),
        }
    }
}

impl Params {
    fn shape(&self) -> ParamsShape {
        match self {
            Params::Initialize(_) => ParamsShape::Initialize,
            Params::Empty => ParamsShape::Empty,
            Params::ToolCall(_) => ParamsShape::ToolCall,
            Params::ResourceRead(_) => ParamsShape::ResourceRead,
        }
    }

    fn mismatch(&self, expected: ParamsShape) -> RpcError {
        RpcError::Internal(format!(
            "route expected {expected:?} params, got {:?}",
            self.shape()
        ))
    }

    pub fn into_initialize(self) -> RpcResult<InitializeParams> {
        match self {
            Params::Initialize(params) => Ok(params),
            other => Err(other.mismatch(ParamsShape::Initialize)),
        }
    }

    pub fn into_tool_call(self) -> RpcResult<ToolCallParams> {
        match self {
            Params::ToolCall(params) => Ok(params),
            other => Err(other.mismatch(ParamsShape::ToolCall)),
        }
    }

    pub fn into_resource_read(self) -> RpcResult<ResourceReadParams> {
        match self {
            Params::ResourceRead(params) => Ok(params),
            other => Err(other.mismatch(ParamsShape::ResourceRead)),
        }
    }
}
