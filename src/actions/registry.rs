//! Action registry: the tool catalog for one agent

use crate::actions::Action;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Catalog of [`Action`]s keyed by unique name.
///
/// Enumeration follows registration order; re-registering a name overwrites
/// the action in place, keeping its original position.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
    index: HashMap<String, usize>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an action, overwriting any previous action with the same name
    pub fn register(&mut self, action: Action) {
        match self.index.get(action.name()) {
            Some(&position) => {
                self.actions[position] = action;
            }
            None => {
                self.index
                    .insert(action.name().to_string(), self.actions.len());
                self.actions.push(action);
            }
        }
    }

    /// Look up an action by name
    pub fn get(&self, name: &str) -> Result<&Action> {
        self.index
            .get(name)
            .map(|&position| &self.actions[position])
            .ok_or_else(|| Error::UnknownAction {
                name: name.to_string(),
            })
    }

    /// All actions in registration order
    pub fn list(&self) -> Vec<&Action> {
        self.actions.iter().collect()
    }

    /// Actions whose tag set intersects `tags`, in registration order
    pub fn list_by_tags(&self, tags: &[&str]) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|action| tags.iter().any(|tag| action.has_tag(tag)))
            .collect()
    }

    /// Exactly the named actions in registration order; fails on any miss
    pub fn list_by_names(&self, names: &[&str]) -> Result<Vec<&Action>> {
        for name in names {
            if !self.index.contains_key(*name) {
                return Err(Error::UnknownAction {
                    name: name.to_string(),
                });
            }
        }

        Ok(self
            .actions
            .iter()
            .filter(|action| names.contains(&action.name()))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
