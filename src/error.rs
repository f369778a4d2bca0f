//! Error types and handling for the GAME agent core

use thiserror::Error;

/// Result type alias for agent core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the agent core
#[derive(Error, Debug)]
pub enum Error {
    /// Bad registration or builder wiring; fatal, surfaced immediately
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The model requested an action that is not registered. Recovered
    /// inside the loop as a tool-error result; only fatal when surfaced
    /// through a direct registry lookup.
    #[error("unknown action: {name}")]
    UnknownAction { name: String },

    /// Prompt construction failed
    #[error("prompt construction error: {0}")]
    PromptConstruction(#[from] PromptConstructionError),

    /// The model backend produced a structurally malformed payload;
    /// fatal to the run since no valid action can be derived
    #[error("response parse error: {0}")]
    ResponseParse(#[from] ResponseParseError),

    /// Failure from the external completion collaborator, propagated as-is
    #[error(transparent)]
    Completion(anyhow::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Registration and builder wiring errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("action name must not be empty")]
    EmptyActionName,

    #[error("agent requires at least one goal")]
    NoGoals,

    #[error("agent requires a completion client")]
    MissingCompletionClient,
}

/// Prompt construction errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromptConstructionError {
    /// An agent with no actions can never terminate
    #[error("no actions available")]
    NoActions,
}

/// Structural failures in the model backend's payload
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResponseParseError {
    #[error("model response contained neither text nor a tool call")]
    EmptyResponse,

    #[error("tool call is missing a tool name")]
    MissingToolName,

    #[error("tool call arguments are not a JSON object: {message}")]
    InvalidArguments { message: String },

    #[error("action block is not valid JSON: {message}")]
    MalformedActionBlock { message: String },

    #[error("action block is missing the \"tool\" field")]
    MissingToolField,
}

/// Typed argument failures raised by action handlers. These are recovered
/// by the environment and recorded as `tool_error`, never propagated.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ToolExecutionError {
    #[error("missing argument: {name}")]
    MissingArgument { name: String },

    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },
}
