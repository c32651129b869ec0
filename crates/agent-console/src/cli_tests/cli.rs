//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    // Verify the CLI configuration is valid
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_means_console() {
    let cli = Cli::try_parse_from(["bac"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.api_key.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn test_tui_subcommand_parses() {
    let cli = Cli::try_parse_from(["bac", "tui"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Tui)));
}

#[test]
fn test_list_defaults() {
    let cli = Cli::try_parse_from(["bac", "list"]).unwrap();
    match cli.command {
        Some(Commands::List {
            limit,
            cursor,
            all,
            json,
        }) => {
            assert_eq!(limit, 20);
            assert!(cursor.is_none());
            assert!(!all);
            assert!(!json);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_list_all_flags() {
    let cli = Cli::try_parse_from([
        "bac", "list", "--limit", "100", "--cursor", "cur_1", "--all", "--json",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::List {
            limit,
            cursor,
            all,
            json,
        }) => {
            assert_eq!(limit, 100);
            assert_eq!(cursor.as_deref(), Some("cur_1"));
            assert!(all);
            assert!(json);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_list_limit_out_of_range_fails() {
    assert!(Cli::try_parse_from(["bac", "list", "--limit", "0"]).is_err());
    assert!(Cli::try_parse_from(["bac", "list", "--limit", "101"]).is_err());
}

#[test]
fn test_status_requires_id() {
    assert!(Cli::try_parse_from(["bac", "status"]).is_err());
    let cli = Cli::try_parse_from(["bac", "status", "bc_1", "--json"]).unwrap();
    match cli.command {
        Some(Commands::Status { id, json }) => {
            assert_eq!(id, "bc_1");
            assert!(json);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_followup_takes_id_and_prompt() {
    let cli = Cli::try_parse_from(["bac", "followup", "bc_1", "also add tests"]).unwrap();
    match cli.command {
        Some(Commands::Followup { id, prompt }) => {
            assert_eq!(id, "bc_1");
            assert_eq!(prompt, "also add tests");
        }
        _ => panic!("unexpected command variant"),
    }
    assert!(Cli::try_parse_from(["bac", "followup", "bc_1"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "bac",
        "conversation",
        "bc_1",
        "--api-key",
        "key_x",
        "--config",
        "/tmp/bac.toml",
    ])
    .unwrap();
    assert_eq!(cli.api_key.as_deref(), Some("key_x"));
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/bac.toml")));
    assert!(matches!(cli.command, Some(Commands::Conversation { .. })));
}

#[test]
fn test_config_init_force() {
    let cli = Cli::try_parse_from(["bac", "config", "init", "--force"]).unwrap();
    match cli.command {
        Some(Commands::Config {
            action: ConfigAction::Init { force },
        }) => assert!(force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_without_action_fails() {
    let result = Cli::try_parse_from(["bac", "config"]);
    assert!(result.is_err());
}

#[test]
fn test_subcommands_in_help() {
    let cmd = Cli::command();
    let names: Vec<&str> = cmd.get_subcommands().map(|sc| sc.get_name()).collect();
    for expected in [
        "tui",
        "list",
        "status",
        "conversation",
        "followup",
        "keyinfo",
        "init",
        "config",
    ] {
        assert!(names.contains(&expected), "missing subcommand {expected}");
    }
}
