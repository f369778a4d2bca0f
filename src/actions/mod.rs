//! Actions: named, schema-described callable capabilities

pub mod builtin;
mod registry;
mod schema;

pub use registry::ActionRegistry;
pub use schema::{ParameterSchema, ParameterType};

use crate::error::{ConfigurationError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Argument mapping passed to an action handler
pub type ActionArgs = serde_json::Map<String, Value>;

/// Handler invoked when an action executes. Failures of any shape flow back
/// as `anyhow` errors and are contained by the environment.
pub type ActionHandler = Arc<dyn Fn(&ActionArgs) -> anyhow::Result<Value> + Send + Sync>;

/// A named capability exposed to the model.
///
/// Owned by the [`ActionRegistry`] that registered it; the handler is
/// reference-counted, never copied. The parameter schema is rendered once at
/// build time and cached here.
#[derive(Clone)]
pub struct Action {
    name: String,
    description: String,
    parameters: Value,
    handler: ActionHandler,
    terminal: bool,
    tags: HashSet<String>,
}

impl Action {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cached JSON schema describing the handler's arguments
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Whether selecting this action ends the run
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Invoke the handler with the given arguments
    pub fn invoke(&self, args: &ActionArgs) -> anyhow::Result<Value> {
        (self.handler)(args)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("terminal", &self.terminal)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Builder for registering an action with optional metadata overrides.
///
/// Defaults: empty description, empty object schema, non-terminal, no tags.
pub struct ActionBuilder {
    name: String,
    description: String,
    schema: ParameterSchema,
    handler: ActionHandler,
    terminal: bool,
    tags: HashSet<String>,
}

impl ActionBuilder {
    /// Start building an action from a name and handler
    pub fn new<S, F>(name: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(&ActionArgs) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            schema: ParameterSchema::new(),
            handler: Arc::new(handler),
            terminal: false,
            tags: HashSet::new(),
        }
    }

    /// Set the human-readable description shown to the model
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Set the parameter schema
    pub fn schema(mut self, schema: ParameterSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Mark the action as terminal
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Add a single tag
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add several tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the action, rendering and caching its parameter schema
    pub fn build(self) -> Result<Action> {
        if self.name.is_empty() {
            return Err(ConfigurationError::EmptyActionName.into());
        }

        Ok(Action {
            parameters: self.schema.to_json(),
            name: self.name,
            description: self.description,
            handler: self.handler,
            terminal: self.terminal,
            tags: self.tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_defaults() {
        let action = ActionBuilder::new("echo", |args| Ok(Value::Object(args.clone())))
            .build()
            .unwrap();

        assert_eq!(action.name(), "echo");
        assert_eq!(action.description(), "");
        assert!(!action.terminal());
        assert!(action.tags().is_empty());
        assert_eq!(
            action.parameters(),
            &json!({ "type": "object", "properties": {}, "required": [] })
        );
    }

    #[test]
    fn builder_rejects_empty_name() {
        let result = ActionBuilder::new("", |_| Ok(Value::Null)).build();
        assert!(matches!(
            result,
            Err(crate::Error::Configuration(
                ConfigurationError::EmptyActionName
            ))
        ));
    }

    #[test]
    fn schema_is_cached_on_the_action() {
        let action = ActionBuilder::new("search", |_| Ok(Value::Null))
            .schema(ParameterSchema::new().required("query", ParameterType::String))
            .build()
            .unwrap();

        assert_eq!(
            action.parameters()["properties"]["query"]["type"],
            json!("string")
        );
        assert_eq!(action.parameters()["required"], json!(["query"]));
    }

    #[test]
    fn invoke_passes_arguments_through() {
        let action = ActionBuilder::new("echo", |args| {
            Ok(args.get("text").cloned().unwrap_or(Value::Null))
        })
        .build()
        .unwrap();

        let mut args = ActionArgs::new();
        args.insert("text".to_string(), json!("hello"));
        assert_eq!(action.invoke(&args).unwrap(), json!("hello"));
    }

    #[test]
    fn tags_and_terminal_flag() {
        let action = ActionBuilder::new("finish", |_| Ok(Value::Null))
            .terminal()
            .tag("system")
            .tags(["control", "system"])
            .build()
            .unwrap();

        assert!(action.terminal());
        assert!(action.has_tag("system"));
        assert!(action.has_tag("control"));
        assert_eq!(action.tags().len(), 2);
    }
}
