//! Goal definitions for agent runs

use serde::{Deserialize, Serialize};

/// A single objective handed to the agent for one run.
///
/// Goals are immutable once constructed. The core never re-sorts the
/// caller's goal list; rendering order is the language binding's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    priority: u32,
    name: String,
    description: String,
}

impl Goal {
    /// Create a new goal. Lower priority values are rendered first.
    pub fn new<S: Into<String>>(priority: u32, name: S, description: S) -> Self {
        Self {
            priority,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
