//! Logging setup
//!
//! Console output goes to stderr, filtered by `RUST_LOG` (default `warn`);
//! `keybridge::keymap=debug` shows every per-binding decision. A debug-level
//! copy rotates daily under the config dir's `logs/keybridge.log`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use std::path::PathBuf;

const LOG_FILE: &str = "keybridge.log";

/// Logs directory, or `None` with a warning when it cannot be created
fn logs_dir() -> Option<PathBuf> {
    match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    }
}

/// Install the console and file subscribers
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = logs_dir().map(|dir| {
        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE))
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new("debug"))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
