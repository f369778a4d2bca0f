//! Response wire shapes: a tool invocation or free text

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tool invocation as emitted by the model backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,

    /// Name of the tool to call
    pub name: String,

    /// JSON-encoded argument mapping
    pub arguments: String,
}

impl ToolCall {
    /// Create a tool call with a fresh identifier
    pub fn new<S: Into<String>>(name: S, arguments: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// What the model backend produced for one completion: free text, a tool
/// call, or both (text accompanying the call).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelResponse {
    /// Free-text content, if any
    pub content: Option<String>,

    /// Tool invocation, if the model chose one
    pub tool_call: Option<ToolCall>,
}

impl ModelResponse {
    /// A plain-text response
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self {
            content: Some(content.into()),
            tool_call: None,
        }
    }

    /// A response invoking a tool with JSON-encoded arguments
    pub fn tool_use<S: Into<String>>(name: S, arguments: S) -> Self {
        Self {
            content: None,
            tool_call: Some(ToolCall::new(name, arguments)),
        }
    }
}
