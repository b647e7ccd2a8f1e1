// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Command Dispatch
//!   Chat                      --> dotenv export --> Logging --> run_chat_command
//!   Options | Sources | Version --> Logging --> command
//! ```

use std::process::ExitCode;

use anyhow::Context;

use bloomery::cli::global::GlobalOptions;
use bloomery::cli::{self, Command};
use bloomery::cmd::chat::run_chat_command;
use bloomery::cmd::config::{run_options_command, run_sources_command};
use bloomery::config::loader::ConfigLoader;
use bloomery::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use bloomery::env::LoadedEnv;
use bloomery::error::Result;
use bloomery::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, sources) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => return report_error(&e),
    };

    let result = match &cli.command {
        Some(Command::Version) => with_logging(&config, || {
            handle_version_command();
            Ok(())
        }),
        Some(Command::Options(args)) => with_logging(&config, || run_options_command(args, &config)),
        Some(Command::Sources) => with_logging(&config, || {
            run_sources_command(&sources);
            Ok(())
        }),
        None | Some(Command::Chat) => run_chat(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

/// Runs `command` with logging initialized; the guard flushes on return.
fn with_logging(config: &Config, command: impl FnOnce() -> Result<()>) -> Result<()> {
    let _log_guard = init_logging(&config.log_config()).context("failed to initialize logging")?;
    command()
}

fn run_chat(config: &Config) -> Result<()> {
    let loaded = LoadedEnv::load(&config.agent)?;
    // The dotenv export has to happen before the logger worker thread and
    // the runtime exist.
    // SAFETY: no other thread has been started yet.
    unsafe { loaded.export() };

    with_logging(config, || run_chat_command(config, &loaded))
}

fn report_error(e: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_override(&option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<(Config, Vec<String>)> {
    let loader = build_config_loader(global)?;
    let sources = loader.format_loaded_files();
    let config = loader.build()?;
    Ok((config, sources))
}
