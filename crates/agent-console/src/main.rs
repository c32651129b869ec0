//! Background Agent Console - CLI entry point
//!
//! `bac` with no subcommand opens the interactive console. The other
//! subcommands are one-shot wrappers around the blocking API client.

mod commands;

use agent_console::config::{api_key, xdg};
use agent_console::logging;
use agent_console::tui::app::{App, AppSettings, LoopOptions};
use agent_console::tui::theme::Theme;
use clap::{Parser, Subcommand};
use commands::CliError;
use cursor_agents::{AgentApi, MAX_PAGE_SIZE};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// Extra time the console waits for a remote call beyond the HTTP timeout,
/// so the client's own error is reported first.
const DISPATCH_GRACE: Duration = Duration::from_secs(2);

/// How long to wait for in-flight requests when the console exits.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

/// Background Agent Console
#[derive(Parser)]
#[command(name = "bac")]
#[command(version, about = "Monitor and steer Cursor background agents from the terminal")]
struct Cli {
    /// API key (overrides the config file and CURSOR_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the bac CLI
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Tui,

    /// List agents
    List {
        /// Number of agents to request
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64))]
        limit: u32,
        /// Pagination cursor from a previous listing
        #[arg(long)]
        cursor: Option<String>,
        /// Include expired agents
        #[arg(long)]
        all: bool,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one agent
    Status {
        /// Agent ID
        id: String,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an agent's conversation
    Conversation {
        /// Agent ID
        id: String,
    },

    /// Send a follow-up instruction to a running agent
    Followup {
        /// Agent ID
        id: String,
        /// Instruction text
        prompt: String,
    },

    /// Show details about the API key in use
    Keyinfo,

    /// Save and verify an API key
    Init,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let api_key = cli.api_key.as_deref();
    let config = cli.config.as_deref();

    let command = cli.command.unwrap_or(Commands::Tui);
    // The console logs to a file once the terminal is set up.
    if !matches!(command, Commands::Tui) {
        logging::init_stderr();
    }

    let result = match command {
        Commands::Tui => run_tui(api_key, config),
        Commands::List {
            limit,
            cursor,
            all,
            json,
        } => with_client(api_key, config, |api| {
            let options = commands::ListOptions {
                limit,
                cursor,
                all,
                json,
            };
            commands::run_list_command(api, &options)
        }),
        Commands::Status { id, json } => {
            with_client(api_key, config, |api| commands::run_status_command(api, &id, json))
        }
        Commands::Conversation { id } => {
            with_client(api_key, config, |api| commands::run_conversation_command(api, &id))
        }
        Commands::Followup { id, prompt } => with_client(api_key, config, |api| {
            commands::run_followup_command(api, &id, &prompt)
        }),
        Commands::Keyinfo => commands::run_keyinfo_command(api_key, config),
        Commands::Init => commands::run_init_command(api_key, config),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::run_config_init_command(config, force),
            ConfigAction::Path => commands::run_config_path_command(config),
            ConfigAction::Validate => commands::run_config_validate_command(config),
        },
    };
    commands::exit_code(result)
}

fn with_client<F>(api_key: Option<&str>, config: Option<&Path>, f: F) -> Result<(), CliError>
where
    F: FnOnce(&dyn AgentApi) -> Result<(), CliError>,
{
    let (_, client) = commands::connect(api_key, config)?;
    f(&client)
}

/// Builds everything the console needs, then hands the terminal to [`App::run`].
///
/// The blocking client is created before the runtime and outlives it.
fn run_tui(api_key_flag: Option<&str>, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = commands::load_config(config_path)?;
    let key = api_key::resolve(api_key_flag, &config)?;
    let client = commands::build_client(&config, &key)?;

    if let Err(e) = logging::init_file(&xdg::log_path()) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let settings = AppSettings {
        auto_refresh: config.tui.auto_refresh,
        refresh_interval: config.tui.refresh_interval()?,
        show_expired: config.tui.show_expired,
        api_key_hint: api_key::mask(&key),
        config_path: config_path
            .map_or_else(xdg::config_path, Path::to_path_buf)
            .display()
            .to_string(),
    };
    let options = LoopOptions {
        tick_rate: config.tui.tick_rate()?,
        timeout: config.api.timeout()? + DISPATCH_GRACE,
        page_size: config.tui.page_size()?,
    };
    let theme = Theme::from_name(config.tui.theme);

    let api: Arc<dyn AgentApi> = Arc::new(client);
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        let mut app = App::new(settings);
        app.run(Arc::clone(&api), options, &theme).await
    });
    rt.shutdown_timeout(SHUTDOWN_TIMEOUT);
    drop(api);

    tracing::info!("console closed");
    result.map_err(CliError::from)
}

#[cfg(test)]
mod cli_tests {
    mod cli;
}
