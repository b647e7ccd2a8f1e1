// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::config::types::Provider;
use clap::Parser;
use clap::error::ErrorKind;

#[test]
fn test_no_command_runs_chat() {
    let cli = Cli::try_parse_from(["bloomery"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.global.to_config_overrides().is_empty());
}

#[test]
fn test_parse_chat() {
    let cli = Cli::try_parse_from(["bloomery", "chat"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Chat)));
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["bloomery", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_options_json() {
    let cli = Cli::try_parse_from(["bloomery", "options", "--json"]).unwrap();
    match cli.command {
        Some(Command::Options(args)) => assert!(args.json),
        other => panic!("expected options, got {other:?}"),
    }
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "bloomery",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "-e",
        "secrets.env",
        "-p",
        "openai",
        "-l",
        "4",
        "sources",
    ])
    .unwrap();

    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(cli.global.env_file, Some(PathBuf::from("secrets.env")));
    assert_eq!(cli.global.provider, Some(Provider::OpenAi));
    assert_eq!(cli.global.log_level, Some(4));
    assert!(matches!(cli.command, Some(Command::Sources)));
}

#[test]
fn test_overrides_follow_set_options() {
    let cli = Cli::try_parse_from([
        "bloomery",
        "--set",
        "agent/prompt=you>",
        "-l",
        "3",
        "-k",
        "MY_KEY",
        "--provider",
        "anthropic",
        "--log-file",
        "agent.log",
    ])
    .unwrap();

    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    agent/prompt=you>
    global/output_log_level=3
    global/file_log_level=3
    global/log_file=agent.log
    agent/provider=anthropic
    agent/api_key_var=MY_KEY
    ");
}

#[test]
fn test_file_log_level_overrides_log_level() {
    let cli = Cli::try_parse_from(["bloomery", "-l", "1", "--file-log-level", "6"]).unwrap();
    assert_eq!(
        cli.global.to_config_overrides(),
        ["global/output_log_level=1", "global/file_log_level=6"]
    );
}

#[test]
fn test_rejects_out_of_range_log_level() {
    let err = Cli::try_parse_from(["bloomery", "-l", "7"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_rejects_unknown_provider() {
    let err = Cli::try_parse_from(["bloomery", "--provider", "mistral"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}
