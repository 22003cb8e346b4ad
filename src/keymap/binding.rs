//! A single source keybinding record (`{key, command, when?, args?}`)

use serde_json::Value;

use super::command::MapError;
use super::types::KeyChord;

/// Why a source record was not converted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("binding entry is not object")]
    NotAnObject,
    #[error("missing key")]
    MissingKey,
    #[error("unsupported key expression")]
    UnsupportedKey,
    #[error("command is not string")]
    CommandNotString,
    #[error(transparent)]
    Unmapped(#[from] MapError),
}

/// A validated source binding, borrowing from the parsed record
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBinding<'a> {
    /// Normalized key chord
    pub chord: KeyChord,
    /// Command identifier, possibly `-`-prefixed (removal)
    pub command: &'a str,
    /// Activation condition, if it is a string
    pub when: Option<&'a str>,
    /// Command arguments
    pub args: Option<&'a Value>,
}

impl<'a> SourceBinding<'a> {
    /// Validate a raw record
    ///
    /// Checks run in a fixed order so each rejected record gets exactly one
    /// reason: shape, key presence, key syntax, command type.
    pub fn from_value(value: &'a Value) -> Result<Self, SkipReason> {
        let record = value.as_object().ok_or(SkipReason::NotAnObject)?;

        let key = record
            .get("key")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(SkipReason::MissingKey)?;

        let chord = KeyChord::parse(key).map_err(|_| SkipReason::UnsupportedKey)?;

        let command = record
            .get("command")
            .and_then(Value::as_str)
            .ok_or(SkipReason::CommandNotString)?;

        Ok(Self {
            chord,
            command,
            when: record.get("when").and_then(Value::as_str),
            args: record.get("args"),
        })
    }

    /// Canonical chord text
    pub fn key(&self) -> String {
        self.chord.to_string()
    }
}

/// Text of a raw record field for diagnostics
///
/// Strings are returned verbatim, other values as compact JSON, and a
/// missing field (or a non-object record) as the empty string.
pub fn raw_field(record: &Value, field: &str) -> String {
    match record.get(field) {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_record() {
        let record = json!({
            "key": "ctrl+shift+p",
            "command": "workbench.action.showCommands",
            "when": "editorFocus"
        });
        let binding = SourceBinding::from_value(&record).unwrap();
        assert_eq!(binding.key(), "ctrl-shift-p");
        assert_eq!(binding.command, "workbench.action.showCommands");
        assert_eq!(binding.when, Some("editorFocus"));
        assert!(binding.args.is_none());
    }

    #[test]
    fn test_skip_reasons_in_order() {
        let cases = [
            (json!("ctrl+a"), SkipReason::NotAnObject),
            (json!({"command": "x"}), SkipReason::MissingKey),
            (json!({"key": "   ", "command": "x"}), SkipReason::MissingKey),
            (json!({"key": 5, "command": "x"}), SkipReason::MissingKey),
            (json!({"key": "hyper+a", "command": "x"}), SkipReason::UnsupportedKey),
            (json!({"key": "ctrl+a"}), SkipReason::CommandNotString),
            (json!({"key": "ctrl+a", "command": ["x"]}), SkipReason::CommandNotString),
        ];
        for (record, expected) in cases {
            assert_eq!(
                SourceBinding::from_value(&record).unwrap_err(),
                expected,
                "record {record}"
            );
        }
    }

    #[test]
    fn test_reason_text() {
        assert_eq!(SkipReason::NotAnObject.to_string(), "binding entry is not object");
        assert_eq!(
            SkipReason::from(MapError::UnsupportedCommand("a.b".into())).to_string(),
            "unsupported command: a.b"
        );
    }

    #[test]
    fn test_non_string_when_is_ignored() {
        let record = json!({"key": "f5", "command": "x", "when": true});
        assert_eq!(SourceBinding::from_value(&record).unwrap().when, None);
    }

    #[test]
    fn test_raw_field() {
        let record = json!({"key": "ctrl+a", "command": ["x", 1]});
        assert_eq!(raw_field(&record, "key"), "ctrl+a");
        assert_eq!(raw_field(&record, "command"), r#"["x",1]"#);
        assert_eq!(raw_field(&record, "when"), "");
        assert_eq!(raw_field(&json!(3), "key"), "");
    }
}
