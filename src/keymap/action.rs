//! The action a key chord triggers in a Zed keymap

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Target of a binding
///
/// Zed accepts `null` (explicitly unbound), a bare action name, or a
/// structured value such as `["editor::FoldAtLevel", {"level": 1}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Action {
    Unbound,
    Command(String),
    Structured(Value),
}

impl Action {
    pub fn command(name: impl Into<String>) -> Self {
        Action::Command(name.into())
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, Action::Unbound)
    }

    pub fn to_value(&self) -> Value {
        self.clone().into()
    }

    /// JSON text with object keys sorted recursively
    ///
    /// Two actions compare equal exactly when their canonical forms match.
    pub fn canonical_json(&self) -> String {
        canonicalize(&self.to_value()).to_string()
    }
}

impl From<Value> for Action {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Action::Unbound,
            Value::String(name) => Action::Command(name),
            other => Action::Structured(other),
        }
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        match action {
            Action::Unbound => Value::Null,
            Action::Command(name) => Value::String(name),
            Action::Structured(value) => value,
        }
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::Command(name.to_string())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_json())
    }
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key.clone(), canonicalize(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
