// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings-related commands.

use anyhow::Context;
use serde::Serialize;
use tracing::warn;

use crate::bootstrap::{self, BootstrapReport};
use crate::cli::OptionsArgs;
use crate::config::Config;
use crate::env::{DotenvFile, LoadedEnv, current_env};
use crate::error::Result;

#[derive(Serialize)]
struct OptionsDump<'a> {
    settings: &'a Config,
    session: BootstrapReport,
}

/// Display the resolved settings and what the bootstrap would find.
///
/// An unreadable dotenv file is reported and treated as empty, so the
/// command still works while setting things up.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_options_command(args: &OptionsArgs, config: &Config) -> Result<()> {
    let loaded = LoadedEnv::load(&config.agent).unwrap_or_else(|e| {
        warn!(error = %e, "continuing without the dotenv file");
        LoadedEnv::new(current_env(), DotenvFile::empty(&config.agent.env_file))
    });
    loaded.file().log_summary();

    let report = bootstrap::inspect(&config.agent, loaded.env());

    if args.json {
        let dump = OptionsDump {
            settings: config,
            session: report,
        };
        let json = serde_json::to_string_pretty(&dump).context("failed to serialize settings")?;
        println!("{json}");
    } else {
        for line in format_options_lines(config, &report) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Settings lines followed by the session lines.
#[must_use]
pub fn format_options_lines(config: &Config, report: &BootstrapReport) -> Vec<String> {
    let mut lines = config.format_options();
    lines.extend(report.format_lines());
    lines
}

/// Display loaded configuration files.
pub fn run_sources_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
