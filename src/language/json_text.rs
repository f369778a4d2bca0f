//! Plain-text language binding
//!
//! For backends without native tool calling: the action catalog is rendered
//! into the system message and the model is instructed to answer with a
//! fenced `action` block holding a JSON invocation. A response without any
//! action block is treated as plain text and mapped to the fallback action.

use crate::actions::{Action, ActionArgs};
use crate::error::{PromptConstructionError, ResponseParseError, Result};
use crate::goal::Goal;
use crate::language::{
    goal_instructions, memory_messages, AgentLanguage, Invocation, Message, ModelResponse, Prompt,
};
use crate::memory::Memory;
use serde_json::{json, Value};

const ACTION_FORMAT: &str = r#"<Stop and think step by step. Insert your thoughts here.>

```action
{
    "tool": "tool_name",
    "args": {...fill in arguments...}
}
```"#;

const BLOCK_START: &str = "```action";
const BLOCK_END: &str = "```";

/// Language binding emitting a JSON action block inside free text
#[derive(Debug, Clone)]
pub struct JsonActionLanguage {
    fallback_action: String,
}

impl JsonActionLanguage {
    /// Create a binding with the conventional `terminate` fallback
    pub fn new() -> Self {
        Self {
            fallback_action: "terminate".to_string(),
        }
    }

    /// Override the action used when the model answers in plain text
    pub fn with_fallback<S: Into<String>>(fallback_action: S) -> Self {
        Self {
            fallback_action: fallback_action.into(),
        }
    }

    fn fallback_invocation(&self, text: &str) -> Invocation {
        let mut args = ActionArgs::new();
        args.insert("message".to_string(), Value::String(text.to_string()));
        Invocation {
            tool: self.fallback_action.clone(),
            args,
        }
    }
}

impl Default for JsonActionLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentLanguage for JsonActionLanguage {
    fn construct_prompt(
        &self,
        goals: &[Goal],
        memory: &Memory,
        actions: &[&Action],
    ) -> Result<Prompt> {
        if actions.is_empty() {
            return Err(PromptConstructionError::NoActions.into());
        }

        let catalog: Vec<Value> = actions
            .iter()
            .map(|action| {
                json!({
                    "name": action.name(),
                    "description": action.description(),
                    "args": action.parameters(),
                })
            })
            .collect();

        let system = format!(
            "{}\n\nAvailable Tools: {}\n\n{}",
            goal_instructions(goals),
            serde_json::to_string_pretty(&catalog)?,
            ACTION_FORMAT,
        );

        let mut messages = vec![Message::system(system)];
        messages.extend(memory_messages(memory)?);

        // No native tool declarations in this protocol
        Ok(Prompt::new(messages, Vec::new()))
    }

    fn parse_response(&self, response: &ModelResponse) -> Result<Invocation> {
        let text = match &response.content {
            Some(text) => text,
            None => return Err(ResponseParseError::EmptyResponse.into()),
        };

        let block = match extract_action_block(text) {
            Some(block) => block,
            None => return Ok(self.fallback_invocation(text)),
        };

        let decoded: Value = serde_json::from_str(block).map_err(|err| {
            ResponseParseError::MalformedActionBlock {
                message: err.to_string(),
            }
        })?;

        let tool = decoded
            .get("tool")
            .and_then(|value| value.as_str())
            .ok_or(ResponseParseError::MissingToolField)?
            .to_string();

        let args = match decoded.get("args") {
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(ResponseParseError::InvalidArguments {
                    message: format!("expected a JSON object, got {other}"),
                }
                .into())
            }
            None => ActionArgs::new(),
        };

        Ok(Invocation { tool, args })
    }
}

/// Slice out the contents of the first fenced action block, tolerating a
/// missing closing fence the way the original parser did.
fn extract_action_block(text: &str) -> Option<&str> {
    let start = text.find(BLOCK_START)? + BLOCK_START.len();
    let rest = &text[start..];
    let body = match rest.find(BLOCK_END) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(body.trim())
}
