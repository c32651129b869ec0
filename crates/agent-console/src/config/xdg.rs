//! Platform-aware path resolution for the background agent console.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! `$XDG_CONFIG_HOME/background-agent-console` or `~/.config/background-agent-console`.
//!
//! On **macOS**, uses Apple conventions with an XDG env var override:
//! `$XDG_CONFIG_HOME/background-agent-console` or
//! `~/Library/Application Support/background-agent-console`.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "background-agent-console";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/background-agent-console` (if set and non-empty, any platform)
/// 2. Platform default (`~/.config` on Linux, `~/Library/Application Support` on macOS)
pub fn config_dir() -> PathBuf {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_NAME),
        _ => platform_config_dir().join(APP_NAME),
    }
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    let base = dirs::config_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::home_dir().map(|home| home.join(".config"));

    base.unwrap_or_else(std::env::temp_dir)
}

/// Returns the path to the main configuration file (`config_dir()/config.toml`).
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the path of the interactive console's log file.
///
/// The TUI owns the terminal, so its diagnostics go to a file instead of stderr.
pub fn log_path() -> PathBuf {
    config_dir().join("tui.log")
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
