//! # game-agent-core
//!
//! Minimal agent-orchestration core implementing a Goals-Actions-Memory-
//! Environment (GAME) cycle: repeatedly ask a language model what to do
//! next, execute the chosen action against a registered tool set, record the
//! outcome, and stop when a terminal action fires or the iteration cap is
//! reached.
//!
//! The model completion itself is an external collaborator behind
//! [`CompletionClient`]; the core only defines how prompts are built and
//! responses decoded, via a pluggable [`AgentLanguage`] binding.

// Core modules
pub mod actions;
pub mod agent;
pub mod completion;
pub mod environment;
pub mod error;
pub mod goal;
pub mod language;
pub mod memory;

// Re-export commonly used types
pub use actions::{Action, ActionArgs, ActionBuilder, ActionRegistry, ParameterSchema, ParameterType};
pub use agent::{Agent, AgentBuilder, AgentConfig, RunState};
pub use completion::CompletionClient;
pub use environment::{Environment, ExecutionResult};
pub use error::{
    ConfigurationError, Error, PromptConstructionError, ResponseParseError, Result,
    ToolExecutionError,
};
pub use goal::Goal;
pub use language::{
    AgentLanguage, FunctionCallingLanguage, Invocation, JsonActionLanguage, Message, MessageRole,
    ModelResponse, Prompt, ToolCall, ToolDefinition,
};
pub use memory::{Memory, MemoryItem, MemoryKind};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
