// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings types.
//!
//! # Settings Structure
//!
//! ```text
//! Config: GlobalConfig (logging), AgentConfig (bootstrap)
//! Provider: Custom (default) | Anthropic | Gemini | OpenAi
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Model provider the agent is scaffolded for.
///
/// The provider picks the default credential variable. Only the
/// OpenAI-compatible provider derives a base URL and model name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Any provider; credential read from `API_KEY`.
    #[default]
    Custom,
    /// Anthropic Messages API.
    Anthropic,
    /// Google Gemini API.
    Gemini,
    /// OpenAI or any OpenAI-compatible endpoint.
    #[value(name = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    /// Credential variable used when `agent.api_key_var` is not set.
    #[must_use]
    pub const fn default_api_key_var(self) -> &'static str {
        match self {
            Self::Custom => "API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Whether this provider reads `OPENAI_BASE_URL` and `MODEL_NAME`.
    #[must_use]
    pub const fn is_openai_compatible(self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom => write!(f, "custom"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::Gemini => write!(f, "gemini"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "custom" => Ok(Self::Custom),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            _ => Err(ConfigError::InvalidValue {
                section: "agent".to_string(),
                key: "provider".to_string(),
                message: format!(
                    "expected 'custom', 'anthropic', 'gemini' or 'openai', got '{s}'"
                ),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file is written when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Bootstrap settings for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Provider the agent targets.
    pub provider: Provider,
    /// Required credential variable; provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_var: Option<String>,
    /// Dotenv file to load before validation.
    pub env_file: PathBuf,
    /// Fail when the dotenv file cannot be read.
    pub require_env_file: bool,
    /// Prompt written before each read.
    pub prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key_var: None,
            env_file: PathBuf::from(".env"),
            require_env_file: true,
            prompt: "> ".to_string(),
        }
    }
}

impl AgentConfig {
    /// Name of the variable that must hold the credential.
    ///
    /// An empty `api_key_var` falls back to the provider default.
    #[must_use]
    pub fn api_key_var(&self) -> &str {
        self.api_key_var
            .as_deref()
            .map(str::trim)
            .filter(|var| !var.is_empty())
            .unwrap_or_else(|| self.provider.default_api_key_var())
    }
}
