//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()`, and
//! functions to write it (optionally with an API key filled in).

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Background Agent Console Configuration
#
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/background-agent-console/config.toml

# ==============================================================================
# API
# ==============================================================================

[api]

# Cursor API key. Leave empty to use the CURSOR_API_KEY environment variable.
# `bac init` validates a key and stores it here.
api_key = ""

# API root URL.
base_url = "https://api.cursor.com/v0"

# Upper bound for a single request. Examples: "10s", "30s", "1m"
timeout = "30s"

# ==============================================================================
# Interactive console
# ==============================================================================

[tui]

# Refresh the agent list in the background.
auto_refresh = true

# Minimum time between background refreshes.
refresh_interval = "30s"

# How often the console checks whether a refresh is due.
tick_rate = "1s"

# Agents requested per list call (1-100).
page_size = 100

# Show expired agents on startup (toggle with `t` on the dashboard).
show_expired = false

# Color palette. Options: "default", "mono"
theme = "default"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG location.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Same as [`create_default_config`] for an explicit path.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_config(path, DEFAULT_CONFIG_TEMPLATE)
}

/// Stores `api_key` in the config file at `path`.
///
/// A missing file is created from the template. An existing file is parsed,
/// updated in place and rewritten (comments are not preserved).
pub fn save_api_key(path: &Path, api_key: &str) -> Result<(), ConfigError> {
    let quoted = toml::Value::String(api_key.to_string()).to_string();

    let content = if path.exists() {
        let existing = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut table: toml::Table =
            existing.parse().map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: 0,
                column: 0,
                message: e.message().to_string(),
            })?;
        let api = table
            .entry("api")
            .or_insert(toml::Value::Table(toml::Table::new()));
        match api.as_table_mut() {
            Some(api) => {
                api.insert("api_key".to_string(), toml::Value::String(api_key.to_string()));
            }
            None => {
                return Err(ConfigError::InvalidValue {
                    field: "api",
                    message: "expected a table".to_string(),
                })
            }
        }
        toml::to_string(&table).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })?
    } else {
        DEFAULT_CONFIG_TEMPLATE.replacen("api_key = \"\"", &format!("api_key = {quoted}"), 1)
    };

    write_config(path, &content)
}

/// Writes `content` to `path`, creating parent dirs and setting 0600 permissions.
fn write_config(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, content).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
