//! Environment: safe action execution and result formatting
//!
//! The sole boundary where tool failures are contained. Each handler runs
//! exactly once per call; retry policy, if any, belongs to the caller.

use crate::actions::{Action, ActionArgs};
use crate::memory::MemoryItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one action execution, produced fresh per call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    /// Name of the executed (or requested) tool
    pub tool_name: String,

    /// Arguments the tool was called with
    pub tool_args: ActionArgs,

    /// Handler return value on success
    pub tool_output: Option<Value>,

    /// Stringified error with cause chain on failure
    pub tool_error: Option<String>,
}

impl ExecutionResult {
    /// A successful execution
    pub fn success<S: Into<String>>(tool_name: S, tool_args: ActionArgs, output: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_args,
            tool_output: Some(output),
            tool_error: None,
        }
    }

    /// A failed execution
    pub fn failure<S: Into<String>>(tool_name: S, tool_args: ActionArgs, error: S) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_args,
            tool_output: None,
            tool_error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.tool_error.is_some()
    }
}

/// Executes resolved actions and normalizes outcomes into memory records
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Environment {
    pub fn new() -> Self {
        Self
    }

    /// Invoke `action` with `args`, containing any handler failure.
    ///
    /// The loop must never crash because a tool failed: handler errors are
    /// converted into a result with `tool_error` set and a null output.
    pub fn execute(&self, action: &Action, args: ActionArgs) -> ExecutionResult {
        match action.invoke(&args) {
            Ok(output) => ExecutionResult::success(action.name().to_string(), args, output),
            Err(err) => {
                tracing::warn!(tool = action.name(), error = %err, "action failed");
                ExecutionResult::failure(action.name().to_string(), args, format!("{err:#}"))
            }
        }
    }

    /// Wrap an execution result as an action-result memory item
    pub fn format_result(&self, result: &ExecutionResult) -> MemoryItem {
        let mut content = serde_json::Map::new();
        content.insert(
            "tool_name".to_string(),
            Value::String(result.tool_name.clone()),
        );
        content.insert(
            "tool_args".to_string(),
            Value::Object(result.tool_args.clone()),
        );
        content.insert(
            "tool_output".to_string(),
            result.tool_output.clone().unwrap_or(Value::Null),
        );
        content.insert(
            "tool_error".to_string(),
            result
                .tool_error
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        content.insert(
            "timestamp".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );

        MemoryItem::action_result(content)
    }
}
