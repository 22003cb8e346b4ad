//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use keybridge::cli::{CaptureConfig, ConvertConfig};
use keybridge::keymap::{load_keymap_file, EntryPolicy, GroupedKeymap};
use serde_json::Value;

/// Write `value` as pretty JSON to `dir/name`, returning the path
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Write raw text to `dir/name`, returning the path
pub fn write_raw(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Load a keymap file written by the pipeline
pub fn read_keymap(path: &Path) -> GroupedKeymap {
    load_keymap_file(path, EntryPolicy::Reject).unwrap()
}

/// Convert config with every output inside `dir`
pub fn convert_config(dir: &Path, input: PathBuf) -> ConvertConfig {
    ConvertConfig {
        input,
        output: dir.join("zed-keymap.json"),
        auto_output: dir.join("zed-keymap-auto.json"),
        report: dir.join("zed-keymap-report.md"),
        compat_base: Some(dir.join("zed-keymap-emacs-base.json")),
        manual_overrides: Some(dir.join("zed-keymap-manual.json")),
        preferred_contexts: Vec::new(),
    }
}

/// Capture config reading and writing inside `dir`
pub fn capture_config(dir: &Path, input: PathBuf) -> CaptureConfig {
    CaptureConfig {
        input,
        auto_input: dir.join("zed-keymap-auto.json"),
        manual_output: dir.join("zed-keymap-manual.json"),
        final_output: dir.join("zed-keymap.json"),
        preferred_contexts: Vec::new(),
    }
}
