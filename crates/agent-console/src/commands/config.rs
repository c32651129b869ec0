//! `bac config` subcommands.

use super::{load_config, CliError};
use agent_console::config::{api_key, default, xdg};
use std::path::{Path, PathBuf};

fn resolve_path(config_path: Option<&Path>) -> PathBuf {
    config_path.map_or_else(xdg::config_path, Path::to_path_buf)
}

/// `bac config init [--force]`.
pub(crate) fn run_config_init_command(
    config_path: Option<&Path>,
    force: bool,
) -> Result<(), CliError> {
    let path = resolve_path(config_path);
    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        xdg::ensure_dir(parent)?;
    }
    default::create_default_config_at(&path, force)?;
    println!("Created configuration at {}", path.display());
    Ok(())
}

/// `bac config path`.
pub(crate) fn run_config_path_command(config_path: Option<&Path>) -> Result<(), CliError> {
    println!("{}", resolve_path(config_path).display());
    Ok(())
}

/// `bac config validate`: parses and checks the file, then prints it.
///
/// The API key is masked in the output.
pub(crate) fn run_config_validate_command(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = resolve_path(config_path);
    if config_path.is_none() && !path.exists() {
        println!("No configuration file at {}, defaults apply", path.display());
    }
    let config = load_config(config_path)?;
    println!("Configuration is valid");
    println!("  API key:          {}", api_key::mask(&config.api.api_key));
    println!("  Base URL:         {}", config.api.base_url);
    println!("  Timeout:          {}", config.api.timeout);
    println!("  Auto-refresh:     {}", config.tui.auto_refresh);
    println!("  Refresh interval: {}", config.tui.refresh_interval);
    println!("  Page size:        {}", config.tui.page_size);
    Ok(())
}
