//! Declarative tool arguments, the JSON Schema generated from them, and the
//! validation of call arguments against the same declaration.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ArgType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Integer => "integer",
            ArgType::Number => "number",
            ArgType::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ArgType::String => value.is_string(),
            ArgType::Integer => value.is_i64() || value.is_u64(),
            ArgType::Number => value.is_number(),
            ArgType::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolArgument {
    pub name: &'static str,
    pub arg_type: ArgType,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
    pub min_length: Option<usize>,
}

pub fn build_input_schema(arguments: &[ToolArgument]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for arg in arguments {
        let mut prop = Map::new();
        prop.insert(
            "type".to_string(),
            Value::String(arg.arg_type.as_str().to_string()),
        );
        prop.insert(
            "description".to_string(),
            Value::String(arg.description.to_string()),
        );
        if let Some(default) = arg.default {
            prop.insert("default".to_string(), Value::String(default.to_string()));
        }
        if let Some(min_length) = arg.min_length {
            prop.insert("minLength".to_string(), Value::from(min_length));
        }
        properties.insert(arg.name.to_string(), Value::Object(prop));
        if arg.required {
            required.push(Value::String(arg.name.to_string()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}

/// Checks `value` against the declared arguments and returns every violated
/// constraint. Undeclared properties are ignored.
pub fn validate_arguments(arguments: &[ToolArgument], value: &Value) -> Result<(), Vec<String>> {
    let empty = Map::new();
    let object = match value {
        Value::Null => &empty,
        Value::Object(object) => object,
        other => {
            return Err(vec![format!(
                "arguments must be an object, got {}",
                json_type_name(other)
            )]);
        }
    };

    let mut violations = Vec::new();

    for arg in arguments {
        match object.get(arg.name) {
            None if arg.required => {
                violations.push(format!("missing required property `{}`", arg.name));
            }
            None => {}
            Some(given) if !arg.arg_type.matches(given) => {
                violations.push(format!(
                    "property `{}` must be of type {}, got {}",
                    arg.name,
                    arg.arg_type.as_str(),
                    json_type_name(given)
                ));
            }
            Some(given) => {
                if let (Some(min), Some(text)) = (arg.min_length, given.as_str()) {
                    if text.trim().chars().count() < min {
                        violations.push(format!(
                            "property `{}` must be at least {} character(s) long",
                            arg.name, min
                        ));
                    }
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
