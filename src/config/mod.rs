// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings management for bloomery.
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ./bloomery.toml (optional)
//! 3. --config FILE (repeatable)
//! 4. BLOOMERY_* env vars
//! 5. --set / dedicated CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! BLOOMERY_AGENT__PROVIDER=openai       → agent.provider = "openai"
//! BLOOMERY_AGENT__API_KEY_VAR=MY_KEY    → agent.api_key_var = "MY_KEY"
//! BLOOMERY_GLOBAL__OUTPUT_LOG_LEVEL=3   → global.output_log_level = 3
//! ```
//!
//! The dotenv file is loaded after settings are resolved, so `BLOOMERY_*`
//! entries inside it do not affect settings.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::logging::LogConfig;

use loader::ConfigLoader;
use types::{AgentConfig, GlobalConfig};

/// Default settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bloomery.toml";

/// Prefix for settings read from the process environment.
pub const ENV_PREFIX: &str = "BLOOMERY";

/// Complete application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Bootstrap options.
    pub agent: AgentConfig,
}

impl Config {
    /// Create a new settings builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bloomery::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("bloomery.toml")
    ///     .with_env_prefix("BLOOMERY")
    ///     .set("agent.provider", "openai")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load settings from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Logging configuration derived from `[global]`.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.global.output_log_level)
            .with_file_level(self.global.file_log_level)
            .maybe_with_log_file(
                self.global
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string()),
            )
            .build()
    }

    /// Format settings for display, one `key = value` per line.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_agent_options(&mut options);
        format_aligned(options)
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
    }

    fn format_agent_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("agent.provider".into(), self.agent.provider.to_string());
        options.insert("agent.api_key_var".into(), self.agent.api_key_var().into());
        options.insert(
            "agent.env_file".into(),
            self.agent.env_file.display().to_string(),
        );
        options.insert(
            "agent.require_env_file".into(),
            self.agent.require_env_file.to_string(),
        );
        options.insert("agent.prompt".into(), format!("{:?}", self.agent.prompt));
    }
}

/// Pads keys so the `=` signs line up.
pub(crate) fn format_aligned(options: BTreeMap<String, String>) -> Vec<String> {
    let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

    options
        .into_iter()
        .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
        .collect()
}
