//! Command implementations for the `bac` CLI.
//!
//! This module contains all one-shot command handlers, organized by domain:
//! - `agents` - list, status, conversation and follow-up
//! - `account` - API key info and first-time setup
//! - `config` - configuration file management
//!
//! Handlers return `Result<(), CliError>`; `main` maps errors to a message on
//! stderr and `ExitCode::FAILURE`.

pub(crate) mod account;
pub(crate) mod agents;
pub(crate) mod config;

pub(crate) use account::*;
pub(crate) use agents::*;
pub(crate) use config::*;

use agent_console::config::{api_key, error::ConfigError, loader::ConfigLoader, schema::Config};
use cursor_agents::{ApiError, Client, ClientBuilder};
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;

/// Anything a one-shot command can fail with.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration could not be loaded, validated or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing output or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid user input caught before any request.
    #[error("{0}")]
    Usage(String),
}

/// Prints the error (if any) and converts to an exit code.
pub(crate) fn exit_code(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads and validates the config at `path` (or the default location).
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    let config = ConfigLoader::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Builds an API client from the config and the resolved API key.
pub(crate) fn build_client(config: &Config, api_key: &str) -> Result<Client, CliError> {
    let client = ClientBuilder::new(api_key)
        .base_url(&config.api.base_url)
        .timeout(config.api.timeout()?)
        .build()?;
    Ok(client)
}

/// Loads config, resolves the API key and builds a client.
pub(crate) fn connect(
    api_key_flag: Option<&str>,
    config_path: Option<&Path>,
) -> Result<(Config, Client), CliError> {
    let config = load_config(config_path)?;
    let key = api_key::resolve(api_key_flag, &config)?;
    let client = build_client(&config, &key)?;
    tracing::debug!(base_url = client.base_url(), "client ready");
    Ok((config, client))
}
