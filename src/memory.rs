//! Ordered, append-only conversation memory

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind tag for a memory record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryKind {
    /// Input supplied by the caller (the task, or seeded conversation turns)
    UserInput,

    /// A raw model response recorded by the caller
    AssistantResponse,

    /// The formatted outcome of one action execution
    ActionResult,

    /// Internal bookkeeping; excluded from prompts via [`Memory::without_kind`]
    SystemNote,
}

/// A single typed record in the agent's memory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryItem {
    /// Kind tag; insertion order is conversation order
    pub kind: MemoryKind,

    /// Record payload as a string-keyed mapping
    pub content: serde_json::Map<String, Value>,
}

impl MemoryItem {
    /// Create a memory item from a kind and payload mapping
    pub fn new(kind: MemoryKind, content: serde_json::Map<String, Value>) -> Self {
        Self { kind, content }
    }

    /// Create a user-input item carrying plain text under `"content"`
    pub fn user_input<S: Into<String>>(text: S) -> Self {
        Self::new(MemoryKind::UserInput, text_content(text))
    }

    /// Create an assistant-response item carrying plain text under `"content"`
    pub fn assistant_response<S: Into<String>>(text: S) -> Self {
        Self::new(MemoryKind::AssistantResponse, text_content(text))
    }

    /// Create a system-note item carrying plain text under `"content"`
    pub fn system_note<S: Into<String>>(text: S) -> Self {
        Self::new(MemoryKind::SystemNote, text_content(text))
    }

    /// Create an action-result item from a prepared payload mapping
    pub fn action_result(content: serde_json::Map<String, Value>) -> Self {
        Self::new(MemoryKind::ActionResult, content)
    }
}

fn text_content<S: Into<String>>(text: S) -> serde_json::Map<String, Value> {
    let mut content = serde_json::Map::new();
    content.insert("content".to_string(), Value::String(text.into()));
    content
}

/// Ordered, append-only log of [`MemoryItem`]s.
///
/// The memory owns its sequence exclusively and only hands out read-only
/// views; items are never reordered or deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Memory {
    items: Vec<MemoryItem>,
}

impl Memory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; O(1), never fails
    pub fn add(&mut self, item: MemoryItem) {
        self.items.push(item);
    }

    /// Return the most recent `limit` items in original order, or all items
    /// when `limit` is `None`.
    pub fn get(&self, limit: Option<usize>) -> &[MemoryItem] {
        match limit {
            Some(n) => &self.items[self.items.len().saturating_sub(n)..],
            None => &self.items,
        }
    }

    /// Return a new memory containing all items except those of the given
    /// kind, preserving order. The source is not mutated.
    pub fn without_kind(&self, kind: MemoryKind) -> Memory {
        Memory {
            items: self
                .items
                .iter()
                .filter(|item| item.kind != kind)
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, MemoryItem> {
        self.items.iter()
    }
}
