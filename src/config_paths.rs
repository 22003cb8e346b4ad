//! Centralized paths for keybridge and the editors it reads
//!
//! keybridge's own files live under:
//! - Unix/macOS: `~/.config/keybridge/`
//! - Windows: `%APPDATA%\keybridge\`
//!
//! The editor paths follow each editor's per-platform defaults.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "keybridge";

/// Default file names inside the keymap directory
pub const FINAL_KEYMAP_FILE: &str = "zed-keymap.json";
pub const AUTO_KEYMAP_FILE: &str = "zed-keymap-auto.json";
pub const MANUAL_OVERRIDES_FILE: &str = "zed-keymap-manual.json";
pub const REPORT_FILE: &str = "zed-keymap-report.md";
pub const COMPAT_BASE_FILE: &str = "zed-keymap-emacs-base.json";

/// Base config directory for keybridge
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/keybridge`
///   - Else: `~/.config/keybridge`
///
/// Windows:
///   - `%APPDATA%\keybridge`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/keybridge/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/keybridge/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// VS Code user `keybindings.json`
///
/// - Linux: `~/.config/Code/User/keybindings.json`
/// - macOS: `~/Library/Application Support/Code/User/keybindings.json`
/// - Windows: `~\AppData\Roaming\Code\User\keybindings.json`
pub fn vscode_keybindings_path() -> Option<PathBuf> {
    editor_config_root(&["Code", "User"]).map(|dir| dir.join("keybindings.json"))
}

/// Zed user `keymap.json`
///
/// - Linux: `~/.config/zed/keymap.json`
/// - macOS: `~/Library/Application Support/Zed/keymap.json`
/// - Windows: `~\AppData\Roaming\Zed\keymap.json`
pub fn zed_keymap_path() -> Option<PathBuf> {
    let name = if cfg!(target_os = "linux") { "zed" } else { "Zed" };
    editor_config_root(&[name]).map(|dir| dir.join("keymap.json"))
}

fn editor_config_root(components: &[&str]) -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let base = if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support")
    } else if cfg!(target_os = "windows") {
        home.join("AppData").join("Roaming")
    } else if cfg!(target_os = "linux") {
        home.join(".config")
    } else {
        return None;
    };
    Some(components.iter().fold(base, |dir, part| dir.join(part)))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
