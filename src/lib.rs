//! keybridge - VS Code to Zed keybinding conversion
//!
//! This crate converts VS Code keybindings into Zed keymaps and maintains
//! them as layers: a compatibility base, an auto-generated baseline and a
//! hand-verified manual override set, merged deterministically.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod pipeline;
pub mod tracing;

// Re-export commonly used types
pub use config::ToolConfig;
pub use keymap::{Action, GroupedKeymap, KeymapError};
