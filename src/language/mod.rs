//! Language bindings: the encode/decode boundary between the loop and a
//! specific model-backend protocol.
//!
//! Each backend protocol is one implementing variant of [`AgentLanguage`],
//! selected at construction time: [`FunctionCallingLanguage`] for native
//! tool-calling backends, [`JsonActionLanguage`] for plain-text backends that
//! emit a fenced JSON action block.

mod function_calling;
mod json_text;
mod prompt;
mod response;

pub use function_calling::FunctionCallingLanguage;
pub use json_text::JsonActionLanguage;
pub use prompt::{FunctionDefinition, Message, MessageRole, Prompt, ToolDefinition};
pub use response::{ModelResponse, ToolCall};

use crate::actions::{Action, ActionArgs};
use crate::error::Result;
use crate::goal::Goal;
use crate::memory::{Memory, MemoryKind};

/// The action the model chose, decoded from a backend response
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Name of the requested action
    pub tool: String,

    /// Decoded argument mapping
    pub args: ActionArgs,
}

/// Encode/decode boundary for one backend protocol
pub trait AgentLanguage: Send + Sync {
    /// Render goals, memory, and the available action catalog into a request
    /// the backend understands. Deterministic given identical inputs.
    fn construct_prompt(
        &self,
        goals: &[Goal],
        memory: &Memory,
        actions: &[&Action],
    ) -> Result<Prompt>;

    /// Extract exactly one action invocation from the backend response
    fn parse_response(&self, response: &ModelResponse) -> Result<Invocation>;
}

const GOAL_SEPARATOR: &str = "\n-------------------\n";

/// Render goal descriptions in ascending priority, stable for equal
/// priorities, into a single system-message body.
pub(crate) fn goal_instructions(goals: &[Goal]) -> String {
    let mut ordered: Vec<&Goal> = goals.iter().collect();
    ordered.sort_by_key(|goal| goal.priority());

    ordered
        .iter()
        .map(|goal| format!("{}:{sep}{}{sep}", goal.name(), goal.description(), sep = GOAL_SEPARATOR))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Translate the memory sequence into role-tagged messages.
///
/// User input and assistant responses keep their text; action results travel
/// back to the model as serialized result mappings in a user message, the way
/// an environment reports to the model. System notes become system messages.
pub(crate) fn memory_messages(memory: &Memory) -> Result<Vec<Message>> {
    let mut messages = Vec::with_capacity(memory.len());

    for item in memory.iter() {
        let message = match item.kind {
            MemoryKind::UserInput => Message::user(item_text(item)?),
            MemoryKind::AssistantResponse => Message::assistant(item_text(item)?),
            MemoryKind::ActionResult => Message::user(serde_json::to_string(&item.content)?),
            MemoryKind::SystemNote => Message::system(item_text(item)?),
        };
        messages.push(message);
    }

    Ok(messages)
}

fn item_text(item: &crate::memory::MemoryItem) -> Result<String> {
    match item.content.get("content").and_then(|value| value.as_str()) {
        Some(text) => Ok(text.to_string()),
        None => Ok(serde_json::to_string(&item.content)?),
    }
}
