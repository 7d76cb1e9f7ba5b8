use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::schema::{ArgType, ToolArgument};
use super::{ToolOutput, ToolSpec};
use crate::mcp::error::{RpcError, RpcResult};

pub const HELLO_COUNCIL: &str = "hello-your-ai-council";

const DEFAULT_GREETING: &str = "Hello from Your AI Council!";
const DEFAULT_DESCRIPTION: &str = "Your council is ready to assist.";

const ARGUMENTS: &[ToolArgument] = &[
    ToolArgument {
        name: "greeting",
        arg_type: ArgType::String,
        description: "Greeting message shown in the widget.",
        required: false,
        default: Some(DEFAULT_GREETING),
        min_length: None,
    },
    ToolArgument {
        name: "description",
        arg_type: ArgType::String,
        description: "Short description displayed below the greeting.",
        required: false,
        default: Some(DEFAULT_DESCRIPTION),
        min_length: None,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreetingResponse {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

pub(super) fn spec() -> ToolSpec {
    ToolSpec {
        name: HELLO_COUNCIL,
        title: "Your AI Council Greeting",
        description: "Returns a friendly greeting rendered by the Your AI Council widget.",
        arguments: ARGUMENTS,
        invoking: "Preparing a greeting",
        invoked: "Greeting ready",
        run,
    }
}

fn run(arguments: Value) -> RpcResult<ToolOutput> {
    let payload: GreetingResponse =
        serde_json::from_value(arguments).map_err(|e| RpcError::Validation(vec![e.to_string()]))?;

    info!(
        "Greeting prepared: {} / {}",
        payload.greeting, payload.description
    );

    Ok(ToolOutput {
        text: format!("Your AI Council greets you: {}", payload.greeting),
        structured: serde_json::to_value(&payload)?,
    })
}
