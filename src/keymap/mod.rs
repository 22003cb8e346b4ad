//! VS Code → Zed keybinding conversion and layered merge
//!
//! This module provides:
//! - Chord normalization (`ctrl+shift+p` → `ctrl-shift-p`)
//! - A static command table mapping VS Code commands to Zed actions
//! - Context inference from `when` expressions
//! - Layered merging (compatibility base, auto baseline, manual overrides)
//! - Snapshot diffs and a Markdown conversion report
//! - Capture of live Zed keymap edits as manual overrides
//!
//! # Architecture
//!
//! ```text
//! keybindings.json → Converter (seeded with base) → auto GroupedKeymap
//!                                                        │
//!                      manual overrides ──── merge ──────┤
//!                                                        ▼
//!                                                  final GroupedKeymap
//! ```
//!
//! # Example
//!
//! ```ignore
//! let records = load_source_bindings(&input)?;
//! let Conversion { keymap, record } = Converter::new(base).convert(&records);
//! let final_keymap = keymap.merged_with(&manual);
//! ```

mod action;
mod binding;
mod capture;
mod command;
mod config;
mod context;
mod convert;
mod diff;
#[allow(clippy::module_inception)]
mod keymap;
mod merge;
mod report;
mod types;

pub use action::Action;
pub use binding::{raw_field, SkipReason, SourceBinding};
pub use capture::{capture, compute_manual_overrides, CaptureOutcome, OMISSION_WARNING};
pub use command::{lookup_command, map_command, MapError, COMMAND_MAP, RUN_COMMANDS_MAP};
pub use config::{
    load_keymap_file, load_live_keymap, load_optional_keymap, load_source_bindings,
    parse_json, parse_jsonc, parse_keymap_value, render_keymap, write_keymap_file, write_text,
    EntryPolicy, KeymapError,
};
pub use context::KeyContext;
pub use convert::{
    convert_bindings, Collision, Conversion, ConversionRecord, Converter, SkippedBinding,
};
pub use diff::{diff_flat, diff_keymaps, ChangeKind, DiffEntry, FlatKeymap, KeymapDiff};
pub use keymap::{ordered_contexts, ContextName, GroupedKeymap, KeymapEntry, PREFERRED_CONTEXTS};
pub use merge::merge_layers;
pub use report::ConversionReport;
pub use types::{normalize_chord, KeyChord, KeyParseError, Keystroke, Modifiers};
