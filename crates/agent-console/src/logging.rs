//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the `BAC_LOG`
//! environment variable. Falls back to `info` level when the variable is unset.
//!
//! # Usage
//!
//! ```bash
//! # Default (info level)
//! bac list
//!
//! # Debug level, module-specific
//! BAC_LOG=agent_console=debug,cursor_agents=debug bac
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "BAC_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the subscriber for one-shot commands, writing to stderr.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_stderr() {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the subscriber for the interactive console, appending to `path`.
///
/// The terminal is in raw mode on the alternate screen while the console runs,
/// so nothing may be written to stdout or stderr.
pub fn init_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        crate::config::xdg::ensure_dir(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}
