//! Function-calling language binding
//!
//! Actions become native tool declarations; a plain-text response maps
//! deterministically to the configured fallback action with the raw text as
//! its sole argument, so well-formed backend output never fails to parse.

use crate::actions::{Action, ActionArgs};
use crate::error::{PromptConstructionError, ResponseParseError, Result};
use crate::goal::Goal;
use crate::language::{
    goal_instructions, memory_messages, AgentLanguage, Invocation, Message, ModelResponse, Prompt,
    ToolDefinition,
};
use crate::memory::Memory;
use serde_json::Value;

/// Language binding for backends with native tool calling
#[derive(Debug, Clone)]
pub struct FunctionCallingLanguage {
    fallback_action: String,
}

impl FunctionCallingLanguage {
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
}

impl Default for FunctionCallingLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentLanguage for FunctionCallingLanguage {
    fn construct_prompt(
        &self,
        goals: &[Goal],
        memory: &Memory,
        actions: &[&Action],
    ) -> Result<Prompt> {
        if actions.is_empty() {
            return Err(PromptConstructionError::NoActions.into());
        }

        let mut messages = vec![Message::system(goal_instructions(goals))];
        messages.extend(memory_messages(memory)?);

        let tools = actions
            .iter()
            .map(|action| {
                ToolDefinition::function(
                    action.name(),
                    action.description(),
                    action.parameters().clone(),
                )
            })
            .collect();

        Ok(Prompt::new(messages, tools))
    }

    fn parse_response(&self, response: &ModelResponse) -> Result<Invocation> {
        if let Some(call) = &response.tool_call {
            if call.name.is_empty() {
                return Err(ResponseParseError::MissingToolName.into());
            }
            return Ok(Invocation {
                tool: call.name.clone(),
                args: decode_arguments(&call.arguments)?,
            });
        }

        match &response.content {
            Some(text) => {
                let mut args = ActionArgs::new();
                args.insert("message".to_string(), Value::String(text.clone()));
                Ok(Invocation {
                    tool: self.fallback_action.clone(),
                    args,
                })
            }
            None => Err(ResponseParseError::EmptyResponse.into()),
        }
    }
}

fn decode_arguments(arguments: &str) -> Result<ActionArgs> {
    if arguments.trim().is_empty() {
        return Ok(ActionArgs::new());
    }

    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ResponseParseError::InvalidArguments {
            message: format!("expected a JSON object, got {other}"),
        }
        .into()),
        Err(err) => Err(ResponseParseError::InvalidArguments {
            message: err.to_string(),
        }
        .into()),
    }
}
