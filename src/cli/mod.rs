// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line parsing with clap derive.
//!
//! # Command Structure
//!
//! ```text
//! bloomery [global options] [command]
//! chat            (default)
//! options [--json]
//! sources
//! version
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};

/// Conversational agent bootstrap.
///
/// Loads credentials from a dotenv file and runs a prompt loop.
#[derive(Debug, Parser)]
#[command(
    name = "bloomery",
    author,
    version,
    about = "Conversational agent bootstrap",
    long_about = "bloomery Copyright (C) 2026 bloomery contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Loads KEY=VALUE pairs from a dotenv file into the environment,\n\
                  checks that the provider credential is present and reads lines\n\
                  from standard input until end of input or Ctrl+C.\n\n\
                  Running `bloomery` without a command starts the prompt loop.",
    after_help = "SETTINGS:\n\n\
                  Settings are read from `bloomery.toml` in the current directory\n\
                  (skip with --no-default-config), then from each --config file,\n\
                  then from BLOOMERY_<SECTION>__<KEY> environment variables, and\n\
                  finally from --set and the dedicated flags. Later sources win."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the prompt loop (default).
    Chat,

    /// Lists all settings and what the bootstrap would resolve.
    Options(OptionsArgs),

    /// Lists the configuration files that were loaded.
    Sources,

    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,
}

/// Arguments for `options`.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionsArgs {
    /// Prints JSON instead of aligned `key = value` lines.
    #[arg(long)]
    pub json: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
