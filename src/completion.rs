//! Completion client trait: the external model collaborator

use crate::language::{ModelResponse, Prompt};
use async_trait::async_trait;

/// Boundary to whatever produces model completions.
///
/// The core treats this as opaque beyond the language binding's
/// encode/decode contract. Failures (network, auth, rate limits) are not
/// caught or wrapped by the loop; they propagate to the caller of
/// [`Agent::run`](crate::agent::Agent::run). Timeout and retry policy
/// belong to the implementation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Produce one completion for the given prompt
    async fn generate_response(&self, prompt: &Prompt) -> anyhow::Result<ModelResponse>;

    /// Name of the backing model, for logging
    fn model_name(&self) -> &str {
        "unknown"
    }
}
