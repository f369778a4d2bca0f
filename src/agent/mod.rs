//! The GAME loop: goals, actions, memory, environment

use crate::actions::ActionRegistry;
use crate::completion::CompletionClient;
use crate::environment::{Environment, ExecutionResult};
use crate::error::{ConfigurationError, Error, Result};
use crate::goal::Goal;
use crate::language::{AgentLanguage, FunctionCallingLanguage, Invocation};
use crate::memory::{Memory, MemoryItem};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Iteration cap; reaching it is a normal terminal outcome
    pub max_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_iterations: 10 }
    }
}

/// Loop state for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Terminated,
}

/// Orchestrates one GAME cycle per iteration: prompt, complete, parse,
/// execute, remember, check termination.
pub struct Agent {
    goals: Vec<Goal>,
    language: Box<dyn AgentLanguage>,
    registry: ActionRegistry,
    environment: Environment,
    client: Arc<dyn CompletionClient>,
    config: AgentConfig,
}

impl Agent {
    /// Start building an agent
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run the loop for `task`, optionally continuing from seeded memory.
    ///
    /// Returns the final memory once a terminal action fires or the
    /// iteration cap is reached. Completion failures and structurally
    /// malformed responses abort the run; unknown actions and tool failures
    /// are recorded in memory and the loop continues.
    pub async fn run(&self, task: &str, seed: Option<Memory>) -> Result<Memory> {
        let mut memory = seed.unwrap_or_default();
        memory.add(MemoryItem::user_input(task));

        let mut state = RunState::Running;
        let mut iteration = 0usize;

        while state == RunState::Running {
            iteration += 1;

            let actions = self.registry.list();
            let prompt = self.language.construct_prompt(&self.goals, &memory, &actions)?;

            tracing::debug!(iteration, model = self.client.model_name(), "requesting completion");
            let response = self
                .client
                .generate_response(&prompt)
                .await
                .map_err(Error::Completion)?;

            let Invocation { tool, args } = self.language.parse_response(&response)?;
            tracing::debug!(iteration, tool = %tool, "model chose an action");

            let (result, terminal) = match self.registry.get(&tool) {
                Ok(action) => {
                    let terminal = action.terminal();
                    (self.environment.execute(action, args), terminal)
                }
                Err(err) => {
                    // Recovered locally: the model sees the error next iteration
                    tracing::warn!(iteration, tool = %tool, "model requested an unregistered action");
                    (ExecutionResult::failure(tool, args, err.to_string()), false)
                }
            };

            memory.add(self.environment.format_result(&result));

            if terminal || iteration >= self.config.max_iterations {
                tracing::debug!(iteration, terminal, "run terminated");
                state = RunState::Terminated;
            }
        }

        Ok(memory)
    }
}

/// Builder assembling an [`Agent`] from its collaborators
pub struct AgentBuilder {
    goals: Vec<Goal>,
    language: Box<dyn AgentLanguage>,
    registry: ActionRegistry,
    client: Option<Arc<dyn CompletionClient>>,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            language: Box::new(FunctionCallingLanguage::new()),
            registry: ActionRegistry::new(),
            client: None,
            config: AgentConfig::default(),
        }
    }

    /// Add a goal
    pub fn goal(mut self, goal: Goal) -> Self {
        self.goals.push(goal);
        self
    }

    /// Add several goals
    pub fn goals<I: IntoIterator<Item = Goal>>(mut self, goals: I) -> Self {
        self.goals.extend(goals);
        self
    }

    /// Set the language binding (defaults to [`FunctionCallingLanguage`])
    pub fn language<L: AgentLanguage + 'static>(mut self, language: L) -> Self {
        self.language = Box::new(language);
        self
    }

    /// Set the action registry
    pub fn registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the completion client
    pub fn client<C: CompletionClient + 'static>(mut self, client: C) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Set the completion client from a shared handle
    pub fn shared_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the iteration cap
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Assemble the agent, validating its wiring
    pub fn build(self) -> Result<Agent> {
        if self.goals.is_empty() {
            return Err(ConfigurationError::NoGoals.into());
        }
        let client = self
            .client
            .ok_or(ConfigurationError::MissingCompletionClient)?;

        Ok(Agent {
            goals: self.goals,
            language: self.language,
            registry: self.registry,
            environment: Environment::new(),
            client,
            config: self.config,
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{builtin, ActionBuilder};
    use crate::error::{PromptConstructionError, ResponseParseError};
    use crate::language::{ModelResponse, Prompt};
    use crate::memory::MemoryKind;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Completion client replaying a fixed script of responses
    struct ScriptedClient {
        responses: Mutex<Vec<ModelResponse>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(responses: Vec<ModelResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn generate_response(&self, _prompt: &Prompt) -> anyhow::Result<ModelResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                anyhow::bail!("script exhausted");
            }
            Ok(responses.remove(0))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn generate_response(&self, _prompt: &Prompt) -> anyhow::Result<ModelResponse> {
            anyhow::bail!("rate limit exceeded")
        }
    }

    fn search_and_finish_registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.register(
            ActionBuilder::new("search", |_| Ok(json!(["result one"])))
                .description("Searches the corpus.")
                .build()
                .unwrap(),
        );
        registry.register(
            ActionBuilder::new("finish", |_| Ok(json!("done")))
                .description("Ends the run.")
                .terminal()
                .build()
                .unwrap(),
        );
        registry
    }

    fn agent_with(
        registry: ActionRegistry,
        responses: Vec<ModelResponse>,
        max_iterations: usize,
    ) -> Agent {
        Agent::builder()
            .goal(Goal::new(1, "Test", "exercise the loop"))
            .registry(registry)
            .client(ScriptedClient::new(responses))
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    fn result_items(memory: &Memory) -> Vec<&MemoryItem> {
        memory
            .iter()
            .filter(|item| item.kind == MemoryKind::ActionResult)
            .collect()
    }

    #[test]
    fn builder_requires_a_client() {
        let result = Agent::builder().goal(Goal::new(1, "G", "d")).build();
        assert!(matches!(
            result,
            Err(Error::Configuration(
                ConfigurationError::MissingCompletionClient
            ))
        ));
    }

    #[test]
    fn builder_requires_goals() {
        let result = Agent::builder().client(FailingClient).build();
        assert!(matches!(
            result,
            Err(Error::Configuration(ConfigurationError::NoGoals))
        ));
    }

    #[tokio::test]
    async fn single_iteration_cap_runs_exactly_one_completion() {
        let client = Arc::new(ScriptedClient::new(vec![ModelResponse::tool_use(
            "search", "{}",
        )]));
        let agent = Agent::builder()
            .goal(Goal::new(1, "Test", "exercise the loop"))
            .registry(search_and_finish_registry())
            .shared_client(client.clone())
            .max_iterations(1)
            .build()
            .unwrap();

        let memory = agent.run("find things", None).await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        // Seed input plus one result, even though the action was not terminal
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.get(None)[0].kind, MemoryKind::UserInput);
        assert_eq!(memory.get(None)[1].kind, MemoryKind::ActionResult);
    }

    #[tokio::test]
    async fn search_then_finish_terminates_after_two_iterations() {
        let agent = agent_with(
            search_and_finish_registry(),
            vec![
                ModelResponse::tool_use("search", "{}"),
                ModelResponse::tool_use("finish", "{}"),
            ],
            10,
        );

        let memory = agent.run("do the thing", None).await.unwrap();

        assert_eq!(memory.len(), 3);
        let results = result_items(&memory);
        assert_eq!(results[0].content["tool_name"], json!("search"));
        assert_eq!(results[1].content["tool_name"], json!("finish"));
        assert_eq!(results[1].content["tool_error"], Value::Null);
    }

    #[tokio::test]
    async fn unknown_actions_are_recovered_until_a_terminal_action() {
        let mut registry = ActionRegistry::new();
        registry.register(builtin::terminate().unwrap());

        let agent = agent_with(
            registry,
            vec![
                ModelResponse::tool_use("ghost", "{}"),
                ModelResponse::tool_use("ghost", "{}"),
                ModelResponse::tool_use("ghost", "{}"),
                ModelResponse::tool_use("terminate", r#"{"message": "giving up"}"#),
            ],
            10,
        );

        let memory = agent.run("call something", None).await.unwrap();
        let results = result_items(&memory);

        assert_eq!(results.len(), 4);
        for error_result in &results[..3] {
            assert_eq!(error_result.content["tool_name"], json!("ghost"));
            assert_eq!(
                error_result.content["tool_error"],
                json!("unknown action: ghost")
            );
            assert_eq!(error_result.content["tool_output"], Value::Null);
        }
        assert_eq!(results[3].content["tool_error"], Value::Null);
        assert_eq!(results[3].content["tool_output"], json!("giving up"));
    }

    #[tokio::test]
    async fn tool_failures_are_recorded_and_the_loop_continues() {
        let mut registry = search_and_finish_registry();
        registry.register(
            ActionBuilder::new("explode", |_| Err(anyhow::anyhow!("no such table")))
                .build()
                .unwrap(),
        );

        let agent = agent_with(
            registry,
            vec![
                ModelResponse::tool_use("explode", "{}"),
                ModelResponse::tool_use("finish", "{}"),
            ],
            10,
        );

        let memory = agent.run("try it", None).await.unwrap();
        let results = result_items(&memory);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content["tool_error"], json!("no such table"));
        assert_eq!(results[1].content["tool_error"], Value::Null);
    }

    #[tokio::test]
    async fn plain_text_response_falls_back_to_terminate() {
        let mut registry = ActionRegistry::new();
        registry.register(builtin::terminate().unwrap());

        let agent = agent_with(
            registry,
            vec![ModelResponse::text("Everything is already done.")],
            10,
        );

        let memory = agent.run("check status", None).await.unwrap();
        let results = result_items(&memory);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].content["tool_output"],
            json!("Everything is already done.")
        );
    }

    #[tokio::test]
    async fn malformed_response_aborts_the_run() {
        let agent = agent_with(
            search_and_finish_registry(),
            vec![ModelResponse::default()],
            10,
        );

        let err = agent.run("task", None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ResponseParse(ResponseParseError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn completion_failures_propagate_unwrapped() {
        let agent = Agent::builder()
            .goal(Goal::new(1, "G", "d"))
            .registry(search_and_finish_registry())
            .client(FailingClient)
            .build()
            .unwrap();

        let err = agent.run("task", None).await.unwrap_err();
        match err {
            Error::Completion(inner) => assert_eq!(inner.to_string(), "rate limit exceeded"),
            other => panic!("expected a completion error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_registry_fails_prompt_construction() {
        let agent = agent_with(ActionRegistry::new(), vec![], 10);
        let err = agent.run("task", None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::PromptConstruction(PromptConstructionError::NoActions)
        ));
    }

    #[tokio::test]
    async fn seeded_memory_is_extended_not_replaced() {
        let mut seed = Memory::new();
        seed.add(MemoryItem::system_note("carried over from a prior run"));

        let agent = agent_with(
            search_and_finish_registry(),
            vec![ModelResponse::tool_use("finish", "{}")],
            10,
        );

        let memory = agent.run("continue", Some(seed)).await.unwrap();
        let items = memory.get(None);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, MemoryKind::SystemNote);
        assert_eq!(items[1].kind, MemoryKind::UserInput);
        assert_eq!(items[2].kind, MemoryKind::ActionResult);
    }
}
