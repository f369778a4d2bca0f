//! Parameter schema builder for actions
//!
//! The original design inferred parameter schemas from handler signatures at
//! registration time. Without runtime reflection the schema is spelled out
//! with an explicit builder instead; the rendered JSON value is cached on the
//! [`Action`](crate::actions::Action) when it is built and never recomputed
//! per call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON-schema type of a single parameter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// The conventional default for untyped parameters
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Object => "object",
            ParameterType::Array => "array",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parameter {
    name: String,
    kind: ParameterType,
    required: bool,
}

/// Ordered description of an action's parameters.
///
/// Renders to a JSON-schema object of the shape
/// `{"type": "object", "properties": {...}, "required": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSchema {
    parameters: Vec<Parameter>,
}

impl ParameterSchema {
    /// Create a schema with no parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter
    pub fn required<S: Into<String>>(mut self, name: S, kind: ParameterType) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Add an optional parameter
    pub fn optional<S: Into<String>>(mut self, name: S, kind: ParameterType) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Render the schema to its JSON value
    pub fn to_json(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for parameter in &self.parameters {
            properties.insert(
                parameter.name.clone(),
                json!({ "type": parameter.kind.as_str() }),
            );
            if parameter.required {
                required.push(Value::String(parameter.name.clone()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
