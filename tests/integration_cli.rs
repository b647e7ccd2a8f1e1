// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use bloomery::cli::{Cli, Command};
use bloomery::config::types::Provider;
use clap::Parser;

// =============================================================================
// Commands
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::parse_from(["bloomery", "-v"]);
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_default_is_chat() {
    let cli = Cli::parse_from(["bloomery", "-e", "dev.env"]);
    assert!(cli.command.is_none());
    assert_eq!(cli.global.to_config_overrides(), ["agent/env_file=dev.env"]);
}

#[test]
fn cli_sources_no_default_config() {
    let cli = Cli::parse_from(["bloomery", "--no-default-config", "sources"]);
    assert!(cli.global.no_default_config);
    assert!(matches!(cli.command, Some(Command::Sources)));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_repeated_set_options_keep_order() {
    let cli = Cli::parse_from([
        "bloomery",
        "-s",
        "agent/prompt=a",
        "-s",
        "agent/prompt=b",
        "--provider",
        "gemini",
    ]);

    assert_eq!(cli.global.provider, Some(Provider::Gemini));
    assert_eq!(
        cli.global.to_config_overrides(),
        ["agent/prompt=a", "agent/prompt=b", "agent/provider=gemini"]
    );
}

#[test]
fn cli_options_json_flag() {
    let cli = Cli::parse_from(["bloomery", "options", "--json"]);
    match cli.command {
        Some(Command::Options(args)) => assert!(args.json),
        other => panic!("expected options, got {other:?}"),
    }
}
