//! Tool configuration persistence
//!
//! Stores user preferences in `~/.config/keybridge/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::keymap::ContextName;

/// keybridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Directory holding the generated keymap files
    #[serde(default = "default_keymap_dir")]
    pub keymap_dir: PathBuf,

    /// Context names emitted before the built-in order in output files
    ///
    /// An empty string stands for the global (context-free) group.
    #[serde(default)]
    pub preferred_contexts: Vec<String>,
}

fn default_keymap_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            keymap_dir: default_keymap_dir(),
            preferred_contexts: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Preferred contexts as keymap context names
    pub fn preferred_context_names(&self) -> Vec<ContextName> {
        self.preferred_contexts
            .iter()
            .map(|name| Some(name.clone()).filter(|name| !name.is_empty()))
            .collect()
    }

    /// Resolve a file name inside the keymap directory
    pub fn keymap_path(&self, file_name: &str) -> PathBuf {
        self.keymap_dir.join(file_name)
    }
}
