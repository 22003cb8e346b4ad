//! Command-line argument parsing
//!
//! Subcommands:
//! - `convert`: VS Code keybindings → auto keymap, final keymap and report
//! - `capture`: live Zed keymap → manual overrides and rebuilt final keymap
//! - `diff`: compare two Zed keymap files

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ToolConfig;
use crate::config_paths::{
    self, AUTO_KEYMAP_FILE, COMPAT_BASE_FILE, FINAL_KEYMAP_FILE, MANUAL_OVERRIDES_FILE,
    REPORT_FILE,
};
use crate::keymap::{ContextName, KeymapError};

/// Convert VS Code keybindings into a layered Zed keymap
#[derive(Parser, Debug)]
#[command(
    name = "keybridge",
    version,
    about = "Convert VS Code keybindings into a layered Zed keymap"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate the auto and final Zed keymaps from VS Code keybindings
    Convert(ConvertArgs),
    /// Capture live Zed keymap edits as manual overrides
    Capture(CaptureArgs),
    /// Compare two Zed keymap files
    Diff(DiffArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// VS Code keybindings.json (default: the platform's VS Code user dir)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Final merged Zed keymap
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Auto-generated keymap, before manual overrides
    #[arg(long, value_name = "PATH")]
    pub auto_output: Option<PathBuf>,

    /// Manual override keymap merged on top of the auto keymap
    #[arg(long, value_name = "PATH")]
    pub manual_overrides: Option<PathBuf>,

    /// Markdown conversion report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Compatibility base keymap seeding the auto keymap
    #[arg(long, value_name = "PATH", conflicts_with = "no_compat_base")]
    pub compat_base: Option<PathBuf>,

    /// Do not seed the auto keymap with a compatibility base
    #[arg(long)]
    pub no_compat_base: bool,

    /// Do not merge manual overrides
    #[arg(long, conflicts_with = "manual_overrides")]
    pub no_manual_overrides: bool,
}

#[derive(Args, Debug, Default)]
pub struct CaptureArgs {
    /// Live Zed keymap.json, JSON or JSONC (default: the platform's Zed config dir)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Auto-generated keymap baseline
    #[arg(long, value_name = "PATH")]
    pub auto_input: Option<PathBuf>,

    /// Manual override keymap to write
    #[arg(long, value_name = "PATH")]
    pub manual_output: Option<PathBuf>,

    /// Final keymap to rebuild
    #[arg(long, value_name = "PATH")]
    pub final_output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Keymap before
    #[arg(value_name = "BEFORE")]
    pub before: PathBuf,

    /// Keymap after
    #[arg(value_name = "AFTER")]
    pub after: PathBuf,

    /// List every differing binding
    #[arg(long)]
    pub list: bool,
}

/// Resolved paths for a `convert` run
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub auto_output: PathBuf,
    pub report: PathBuf,
    pub compat_base: Option<PathBuf>,
    pub manual_overrides: Option<PathBuf>,
    pub preferred_contexts: Vec<ContextName>,
}

/// Resolved paths for a `capture` run
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    pub input: PathBuf,
    pub auto_input: PathBuf,
    pub manual_output: PathBuf,
    pub final_output: PathBuf,
    pub preferred_contexts: Vec<ContextName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffConfig {
    pub before: PathBuf,
    pub after: PathBuf,
    pub list: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub enum RunConfig {
    Convert(ConvertConfig),
    Capture(CaptureConfig),
    Diff(DiffConfig),
}

impl CliArgs {
    /// Resolve parsed CLI args against the tool config
    ///
    /// Unset paths fall back to file names in the configured keymap
    /// directory; an unset input falls back to the editor's default path.
    pub fn into_config(self, tool: &ToolConfig) -> Result<RunConfig, KeymapError> {
        match self.command {
            CliCommand::Convert(args) => args.into_config(tool).map(RunConfig::Convert),
            CliCommand::Capture(args) => args.into_config(tool).map(RunConfig::Capture),
            CliCommand::Diff(args) => Ok(RunConfig::Diff(DiffConfig {
                before: args.before,
                after: args.after,
                list: args.list,
            })),
        }
    }
}

impl ConvertArgs {
    pub fn into_config(self, tool: &ToolConfig) -> Result<ConvertConfig, KeymapError> {
        let input = match self.input {
            Some(input) => input,
            None => config_paths::vscode_keybindings_path()
                .ok_or(KeymapError::UnsupportedPlatform("VS Code keybindings"))?,
        };

        let compat_base = if self.no_compat_base {
            None
        } else {
            Some(
                self.compat_base
                    .unwrap_or_else(|| tool.keymap_path(COMPAT_BASE_FILE)),
            )
        };

        let manual_overrides = if self.no_manual_overrides {
            None
        } else {
            Some(
                self.manual_overrides
                    .unwrap_or_else(|| tool.keymap_path(MANUAL_OVERRIDES_FILE)),
            )
        };

        Ok(ConvertConfig {
            input,
            output: self
                .output
                .unwrap_or_else(|| tool.keymap_path(FINAL_KEYMAP_FILE)),
            auto_output: self
                .auto_output
                .unwrap_or_else(|| tool.keymap_path(AUTO_KEYMAP_FILE)),
            report: self.report.unwrap_or_else(|| tool.keymap_path(REPORT_FILE)),
            compat_base,
            manual_overrides,
            preferred_contexts: tool.preferred_context_names(),
        })
    }
}

impl CaptureArgs {
    pub fn into_config(self, tool: &ToolConfig) -> Result<CaptureConfig, KeymapError> {
        let input = match self.input {
            Some(input) => input,
            None => config_paths::zed_keymap_path()
                .ok_or(KeymapError::UnsupportedPlatform("Zed keymap"))?,
        };

        Ok(CaptureConfig {
            input,
            auto_input: self
                .auto_input
                .unwrap_or_else(|| tool.keymap_path(AUTO_KEYMAP_FILE)),
            manual_output: self
                .manual_output
                .unwrap_or_else(|| tool.keymap_path(MANUAL_OVERRIDES_FILE)),
            final_output: self
                .final_output
                .unwrap_or_else(|| tool.keymap_path(FINAL_KEYMAP_FILE)),
            preferred_contexts: tool.preferred_context_names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> ToolConfig {
        ToolConfig {
            keymap_dir: PathBuf::from("/keymaps"),
            preferred_contexts: vec!["Editor".to_string(), String::new()],
        }
    }

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_convert_defaults_use_keymap_dir() {
        let args = parse(&["keybridge", "convert", "--input", "kb.json"]);
        let RunConfig::Convert(config) = args.into_config(&tool()).unwrap() else {
            panic!("Expected convert config");
        };
        assert_eq!(config.input, PathBuf::from("kb.json"));
        assert_eq!(config.output, PathBuf::from("/keymaps/zed-keymap.json"));
        assert_eq!(config.auto_output, PathBuf::from("/keymaps/zed-keymap-auto.json"));
        assert_eq!(config.report, PathBuf::from("/keymaps/zed-keymap-report.md"));
        assert_eq!(
            config.compat_base,
            Some(PathBuf::from("/keymaps/zed-keymap-emacs-base.json"))
        );
        assert_eq!(
            config.manual_overrides,
            Some(PathBuf::from("/keymaps/zed-keymap-manual.json"))
        );
        assert_eq!(config.preferred_contexts, vec![Some("Editor".to_string()), None]);
    }

    #[test]
    fn test_convert_without_layers() {
        let args = parse(&[
            "keybridge",
            "convert",
            "--input",
            "kb.json",
            "--no-compat-base",
            "--no-manual-overrides",
        ]);
        let RunConfig::Convert(config) = args.into_config(&tool()).unwrap() else {
            panic!("Expected convert config");
        };
        assert_eq!(config.compat_base, None);
        assert_eq!(config.manual_overrides, None);
    }

    #[test]
    fn test_compat_base_flags_conflict() {
        let result = CliArgs::try_parse_from([
            "keybridge",
            "convert",
            "--compat-base",
            "base.json",
            "--no-compat-base",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_capture_explicit_paths() {
        let args = parse(&[
            "keybridge",
            "capture",
            "--input",
            "live.json",
            "--auto-input",
            "auto.json",
            "--manual-output",
            "manual.json",
            "--final-output",
            "final.json",
        ]);
        assert_eq!(
            args.into_config(&tool()).unwrap(),
            RunConfig::Capture(CaptureConfig {
                input: PathBuf::from("live.json"),
                auto_input: PathBuf::from("auto.json"),
                manual_output: PathBuf::from("manual.json"),
                final_output: PathBuf::from("final.json"),
                preferred_contexts: vec![Some("Editor".to_string()), None],
            })
        );
    }

    #[test]
    fn test_diff_requires_two_paths() {
        assert!(CliArgs::try_parse_from(["keybridge", "diff", "a.json"]).is_err());
        let args = parse(&["keybridge", "diff", "a.json", "b.json", "--list"]);
        assert_eq!(
            args.into_config(&tool()).unwrap(),
            RunConfig::Diff(DiffConfig {
                before: PathBuf::from("a.json"),
                after: PathBuf::from("b.json"),
                list: true,
            })
        );
    }
}
