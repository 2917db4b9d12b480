//! Integration tests for the `dbot` argument parser.

use clap::Parser;
use dbot_cli::{Cli, Commands};

/// **Test: each bot subcommand parses, with and without --token.**
#[test]
fn test_subcommands_parse() {
    let cli = Cli::try_parse_from(["dbot", "time"]).unwrap();
    assert_eq!(cli.command, Commands::Time { token: None });

    let cli = Cli::try_parse_from(["dbot", "chat", "--token", "123:abc"]).unwrap();
    assert_eq!(cli.command.token().as_deref(), Some("123:abc"));
    assert_eq!(cli.command.bot_name(), "chat");

    let cli = Cli::try_parse_from(["dbot", "brief", "-t", "456:def"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Brief {
            token: Some("456:def".to_string())
        }
    );
}

/// **Test: default log file is derived from the bot name.**
#[test]
fn test_default_log_file() {
    let cli = Cli::try_parse_from(["dbot", "brief"]).unwrap();
    assert_eq!(cli.command.default_log_file(), "logs/dbot-brief.log");
}

/// **Test: unknown subcommand and missing subcommand are rejected.**
#[test]
fn test_invalid_invocations() {
    assert!(Cli::try_parse_from(["dbot", "run"]).is_err());
    assert!(Cli::try_parse_from(["dbot"]).is_err());
}
