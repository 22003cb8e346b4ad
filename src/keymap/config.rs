//! Keymap and keybinding file I/O
//!
//! Parses Zed keymap files (`[{"context": ..., "bindings": {...}}]`) into
//! [`GroupedKeymap`]s, VS Code `keybindings.json` into raw binding records,
//! and writes keymaps back out in deterministic order.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::action::Action;
use super::keymap::{ContextName, GroupedKeymap};

/// Errors that abort a whole run
#[derive(Debug, thiserror::Error)]
pub enum KeymapError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("expected a JSON list at the root of {}", .path.display())]
    NotAList { path: PathBuf },
    #[error("invalid entry #{index} in {}: {reason}", .path.display())]
    InvalidEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("unsupported platform for default {0} path")]
    UnsupportedPlatform(&'static str),
    #[error("failed to serialize keymap: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// How malformed keymap entries are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPolicy {
    /// Skip the entry with a warning
    Skip,
    /// Fail the whole load
    Reject,
}

/// Build a grouped keymap from a parsed Zed keymap document
///
/// `origin` is only used for diagnostics.
pub fn parse_keymap_value(
    value: Value,
    policy: EntryPolicy,
    origin: &Path,
) -> Result<GroupedKeymap, KeymapError> {
    let Value::Array(entries) = value else {
        return Err(KeymapError::NotAList {
            path: origin.to_path_buf(),
        });
    };

    let mut keymap = GroupedKeymap::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let index = index + 1;
        let bindings = match entry_bindings(&entry) {
            Ok(bindings) => bindings,
            Err(reason) => match policy {
                EntryPolicy::Skip => {
                    tracing::warn!("Skipping entry #{} in {}: {}", index, origin.display(), reason);
                    continue;
                }
                EntryPolicy::Reject => {
                    return Err(KeymapError::InvalidEntry {
                        path: origin.to_path_buf(),
                        index,
                        reason: reason.to_string(),
                    });
                }
            },
        };

        let context: ContextName = entry
            .get("context")
            .and_then(Value::as_str)
            .filter(|context| !context.is_empty())
            .map(str::to_string);

        for (key, action) in bindings {
            if !key.is_empty() {
                keymap.insert(context.clone(), key.clone(), Action::from(action.clone()));
            }
        }
    }
    Ok(keymap)
}

fn entry_bindings(entry: &Value) -> Result<&serde_json::Map<String, Value>, &'static str> {
    let object = entry.as_object().ok_or("entry is not an object")?;
    let bindings = object.get("bindings").ok_or("entry has no `bindings`")?;
    bindings.as_object().ok_or("`bindings` is not an object")
}

/// Parse strict JSON text
pub fn parse_json(text: &str, origin: &Path) -> Result<Value, KeymapError> {
    serde_json::from_str(text).map_err(|e| KeymapError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse JSON that may contain comments and trailing commas
///
/// Both Zed's `keymap.json` and VS Code's `keybindings.json` are JSONC.
pub fn parse_jsonc(text: &str, origin: &Path) -> Result<Value, KeymapError> {
    let text = text.trim_start_matches('\u{feff}');
    serde_json_lenient::from_str(text).map_err(|e| KeymapError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_file(path: &Path) -> Result<String, KeymapError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            KeymapError::MissingFile(path.to_path_buf())
        } else {
            KeymapError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Load a Zed keymap file written by this tool (strict JSON)
pub fn load_keymap_file(path: &Path, policy: EntryPolicy) -> Result<GroupedKeymap, KeymapError> {
    let text = read_file(path)?;
    parse_keymap_value(parse_json(&text, path)?, policy, path)
}

/// Load a live Zed keymap, tolerating comments and trailing commas
pub fn load_live_keymap(path: &Path, policy: EntryPolicy) -> Result<GroupedKeymap, KeymapError> {
    let text = read_file(path)?;
    parse_keymap_value(parse_jsonc(&text, path)?, policy, path)
}

/// Load an optional layer; a missing file yields `None`
///
/// Layers may be hand-edited, so comments and trailing commas are accepted.
pub fn load_optional_keymap(
    path: &Path,
    policy: EntryPolicy,
) -> Result<Option<GroupedKeymap>, KeymapError> {
    match load_live_keymap(path, policy) {
        Ok(keymap) => Ok(Some(keymap)),
        Err(KeymapError::MissingFile(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load VS Code keybinding records; individual records are validated later
pub fn load_source_bindings(path: &Path) -> Result<Vec<Value>, KeymapError> {
    let text = read_file(path)?;
    match parse_jsonc(&text, path)? {
        Value::Array(records) => Ok(records),
        _ => Err(KeymapError::NotAList {
            path: path.to_path_buf(),
        }),
    }
}

/// Render a keymap as pretty-printed JSON with a trailing newline
pub fn render_keymap(
    keymap: &GroupedKeymap,
    preferred: &[ContextName],
) -> Result<String, KeymapError> {
    let mut json = serde_json::to_string_pretty(&keymap.to_entries(preferred))?;
    json.push('\n');
    Ok(json)
}

/// Write text to `path`, creating parent directories
pub fn write_text(path: &Path, content: &str) -> Result<(), KeymapError> {
    let io_err = |source| KeymapError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)
}

/// Write a keymap file, fully replacing any previous content
pub fn write_keymap_file(
    path: &Path,
    keymap: &GroupedKeymap,
    preferred: &[ContextName],
) -> Result<(), KeymapError> {
    write_text(path, &render_keymap(keymap, preferred)?)?;
    tracing::info!("Wrote {} bindings to {}", keymap.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn origin() -> &'static Path {
        Path::new("test.json")
    }

    #[test]
    fn test_parse_keymap_value() {
        let value = json!([
            {"bindings": {"ctrl-q": "zed::Quit"}},
            {"context": "Editor", "bindings": {"ctrl-a": "editor::SelectAll", "ctrl-x": null}},
        ]);
        let keymap = parse_keymap_value(value, EntryPolicy::Reject, origin()).unwrap();
        assert_eq!(keymap.len(), 3);
        assert_eq!(keymap.get(Some("Editor"), "ctrl-x"), Some(&Action::Unbound));
    }

    #[test]
    fn test_root_must_be_list() {
        let err = parse_keymap_value(json!({"bindings": {}}), EntryPolicy::Skip, origin());
        assert!(matches!(err, Err(KeymapError::NotAList { .. })));
    }

    #[test]
    fn test_skip_policy_drops_malformed_entries() {
        let value = json!([
            "not an object",
            {"context": "Editor"},
            {"context": "Editor", "bindings": ["x"]},
            {"bindings": {"ctrl-q": "zed::Quit"}},
        ]);
        let keymap = parse_keymap_value(value, EntryPolicy::Skip, origin()).unwrap();
        assert_eq!(keymap.len(), 1);
    }

    #[test]
    fn test_reject_policy_reports_entry_index() {
        let value = json!([{"bindings": {}}, {"context": "Editor"}]);
        match parse_keymap_value(value, EntryPolicy::Reject, origin()) {
            Err(KeymapError::InvalidEntry { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected InvalidEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_context_is_global() {
        let value = json!([{"context": 3, "bindings": {"a": "x::A"}}]);
        let keymap = parse_keymap_value(value, EntryPolicy::Reject, origin()).unwrap();
        assert!(keymap.get(None, "a").is_some());
    }

    #[test]
    fn test_parse_jsonc_accepts_comments_and_trailing_commas() {
        let text = "\u{feff}[\n  // global\n  {\"bindings\": {\"ctrl-q\": \"zed::Quit\",}}, /* done */\n]";
        let value = parse_jsonc(text, origin()).unwrap();
        let keymap = parse_keymap_value(value, EntryPolicy::Reject, origin()).unwrap();
        assert_eq!(keymap.get(None, "ctrl-q"), Some(&Action::command("zed::Quit")));
    }

    #[test]
    fn test_render_keymap_is_pretty_with_newline() {
        let mut keymap = GroupedKeymap::new();
        keymap.insert(None, "ctrl-q", "zed::Quit".into());
        let text = render_keymap(&keymap, &[]).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"bindings\": {\n      \"ctrl-q\": \"zed::Quit\"\n    }\n  }\n]\n"
        );
    }

    #[test]
    fn test_missing_optional_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_optional_keymap(&dir.path().join("absent.json"), EntryPolicy::Skip);
        assert!(matches!(loaded, Ok(None)));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("keymap.json");
        let mut keymap = GroupedKeymap::new();
        keymap.insert(Some("Editor".into()), "ctrl-a", "editor::SelectAll".into());
        write_keymap_file(&path, &keymap, &[]).unwrap();
        let loaded = load_keymap_file(&path, EntryPolicy::Reject).unwrap();
        assert_eq!(loaded, keymap);
    }
}
