mod council;
mod greeting;
pub mod schema;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use self::schema::{build_input_schema, validate_arguments, ToolArgument};
use super::error::{RpcError, RpcResult};
use super::types::{CallToolResult, TextContent, Tool};
use crate::widget::WIDGET_URI;

pub use council::{convene, CouncilMember, CouncilResponse, ASK_COUNCIL};
pub use greeting::{GreetingResponse, HELLO_COUNCIL};

/// What a tool hands back: a human-readable summary plus the structured
/// payload the widget renders.
pub struct ToolOutput {
    pub text: String,
    pub structured: Value,
}

pub struct ToolSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub arguments: &'static [ToolArgument],
    pub invoking: &'static str,
    pub invoked: &'static str,
    pub run: fn(Value) -> RpcResult<ToolOutput>,
}

impl ToolSpec {
    fn widget_meta(&self) -> Value {
        json!({
            "openai/outputTemplate": WIDGET_URI,
            "openai/toolInvocation/invoking": self.invoking,
            "openai/toolInvocation/invoked": self.invoked,
            "openai/widgetAccessible": true,
        })
    }

    pub fn descriptor(&self) -> Tool {
        Tool {
            name: self.name.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            input_schema: build_input_schema(self.arguments),
            meta: Some(self.widget_meta()),
        }
    }
}

/// The fixed set of tools, in advertisement order.
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn builtin() -> Self {
        Self::new(vec![council::spec(), greeting::spec()])
    }

    pub fn new(tools: Vec<ToolSpec>) -> Self {
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn descriptors(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolSpec::descriptor).collect()
    }

    /// Validate `arguments` against the tool's declared schema, then run it.
    pub fn call(&self, name: &str, arguments: Value) -> RpcResult<CallToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| RpcError::ToolNotFound(name.to_string()))?;

        if let Err(violations) = validate_arguments(tool.arguments, &arguments) {
            warn!("Validation failed for {}: {:?}", name, violations);
            return Err(RpcError::Validation(violations));
        }

        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        let output = (tool.run)(arguments)?;
        debug!("Tool {} produced: {}", name, output.text);

        Ok(CallToolResult {
            content: vec![TextContent::text(output.text)],
            structured_content: output.structured,
            meta: tool.widget_meta(),
            is_error: false,
        })
    }
}
