// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional settings files (can repeat)
//! --env-file FILE     ← agent.env_file
//! --provider NAME     ← agent.provider
//! --api-key-var NAME  ← agent.api_key_var
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level    ← File verbosity (overrides --log-level)
//! --set KEY=VAL       ← Direct settings override
//!
//! Precedence: CLI flags > --set > BLOOMERY_* env > --config > bloomery.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::types::Provider;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML settings file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Dotenv file to load before the credential check.
    #[arg(short = 'e', long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Provider whose credential variable is required.
    #[arg(short = 'p', long = "provider", value_name = "NAME")]
    pub provider: Option<Provider>,

    /// Name of the credential variable, overriding the provider default.
    #[arg(short = 'k', long = "api-key-var", value_name = "NAME")]
    pub api_key_var: Option<String>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Sets an option, such as 'agent/provider=openai' or 'global/output_log_level=4'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables loading bloomery.toml from the current directory, only uses --config.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Converts command-line options to settings overrides.
    ///
    /// Dedicated flags come after `--set`, so they win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global/output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global/file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global/log_file={}", path.display()));
        }

        if let Some(ref path) = self.env_file {
            overrides.push(format!("agent/env_file={}", path.display()));
        }

        if let Some(provider) = self.provider {
            overrides.push(format!("agent/provider={provider}"));
        }

        if let Some(ref var) = self.api_key_var {
            overrides.push(format!("agent/api_key_var={var}"));
        }

        overrides
    }
}
