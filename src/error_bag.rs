//! The insertion-ordered record of rule failures from a validation pass.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single recorded failure: which path failed which rule, with the fully
/// resolved human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub path: String,
    pub rule: String,
    pub message: String,
}

/// Append-only multi-map from field path to its ordered failures.
///
/// Rebuilt fresh on every validation pass; never accumulates across calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ErrorBag {
    entries: Vec<ErrorEntry>,
}

impl ErrorBag {
    pub fn new() -> Self {
        ErrorBag::default()
    }

    pub fn add(&mut self, path: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) {
        self.entries.push(ErrorEntry {
            path: path.into(),
            rule: rule.into(),
            message: message.into(),
        });
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First message recorded for `path`, if any.
    pub fn first(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.message.as_str())
    }

    /// All messages recorded for `path`, in insertion order.
    pub fn all(&self, path: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.path == path)
            .map(|entry| entry.message.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Map view: path → ordered list of messages. Paths appear in first-
    /// failure order.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for entry in &self.entries {
            let list = out
                .entry(entry.path.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(messages) = list {
                messages.push(Value::String(entry.message.clone()));
            }
        }
        out
    }
}
