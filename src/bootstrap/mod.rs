// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Credential validation and derived provider settings.
//!
//! ```text
//! AgentConfig + Env
//!        |
//!        +--> api_key_var()  --> Env::get_non_empty --> Credential | MissingCredential
//!        |
//!        +--> provider == openai
//!                 OPENAI_BASE_URL  (default https://api.openai.com/v1)
//!                 MODEL_NAME       (default gpt-4o)
//!        v
//!   AgentSession (immutable after startup)
//! ```


use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::types::{AgentConfig, Provider};
use crate::env::Env;
use crate::error::{AgentResult, ConfigError};

/// Variable holding the OpenAI-compatible endpoint.
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Endpoint used when `OPENAI_BASE_URL` is unset or empty.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Variable holding the model identifier.
pub const MODEL_NAME_VAR: &str = "MODEL_NAME";
/// Model used when `MODEL_NAME` is unset or empty.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";

/// The required credential, resolved from the environment.
///
/// The value is never printed by `Debug`.
#[derive(Debug)]
pub struct Credential {
    var: String,
    value: SecretString,
}

impl Credential {
    #[must_use]
    pub fn new(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            value: SecretString::from(value.into()),
        }
    }

    /// Name of the variable the credential was read from.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    #[must_use]
    pub const fn secret(&self) -> &SecretString {
        &self.value
    }
}

/// Endpoint and model for OpenAI-compatible providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
}

impl OpenAiSettings {
    /// Reads `OPENAI_BASE_URL` and `MODEL_NAME`, falling back to defaults.
    #[must_use]
    pub fn from_env(env: &Env) -> Self {
        Self {
            base_url: env
                .get_or(OPENAI_BASE_URL_VAR, DEFAULT_OPENAI_BASE_URL)
                .to_string(),
            model: env.get_or(MODEL_NAME_VAR, DEFAULT_MODEL_NAME).to_string(),
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self::from_env(&Env::new())
    }
}

/// Everything the prompt loop needs, resolved once at startup.
#[derive(Debug)]
pub struct AgentSession {
    provider: Provider,
    credential: Credential,
    openai: Option<OpenAiSettings>,
}

impl AgentSession {
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Derived endpoint settings; `None` unless the provider is OpenAI-compatible.
    #[must_use]
    pub const fn openai(&self) -> Option<&OpenAiSettings> {
        self.openai.as_ref()
    }
}

/// Validates the credential and derives provider settings.
///
/// # Errors
///
/// Returns `ConfigError::MissingCredential` if the required variable is
/// unset or empty in `env`.
pub fn resolve(agent: &AgentConfig, env: &Env) -> AgentResult<AgentSession> {
    let var = agent.api_key_var();
    let Some(value) = env.get_non_empty(var) else {
        return Err(ConfigError::MissingCredential {
            var: var.to_string(),
            env_file: agent.env_file.clone(),
        }
        .into());
    };

    let credential = Credential::new(var, value);
    let openai = agent
        .provider
        .is_openai_compatible()
        .then(|| OpenAiSettings::from_env(env));

    info!(provider = %agent.provider, var, "credential resolved");
    if let Some(settings) = &openai {
        debug!(base_url = %settings.base_url, model = %settings.model, "openai-compatible settings");
    }

    Ok(AgentSession {
        provider: agent.provider,
        credential,
        openai,
    })
}

/// What the bootstrap would resolve, without failing on a missing credential.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub provider: Provider,
    pub api_key_var: String,
    pub credential_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiSettings>,
}

impl BootstrapReport {
    /// Format the report as `key = value` lines; the credential is never shown.
    #[must_use]
    pub fn format_lines(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("session.provider".to_string(), self.provider.to_string());
        options.insert(
            format!("session.credential ({})", self.api_key_var),
            if self.credential_present {
                "[hidden]".to_string()
            } else {
                "[missing]".to_string()
            },
        );
        if let Some(openai) = &self.openai {
            options.insert("session.base_url".to_string(), openai.base_url.clone());
            options.insert("session.model".to_string(), openai.model.clone());
        }
        crate::config::format_aligned(options)
    }
}

/// Runs the same lookups as [`resolve`] and reports the outcome.
#[must_use]
pub fn inspect(agent: &AgentConfig, env: &Env) -> BootstrapReport {
    let api_key_var = agent.api_key_var().to_string();
    BootstrapReport {
        provider: agent.provider,
        credential_present: env.get_non_empty(&api_key_var).is_some(),
        api_key_var,
        openai: agent
            .provider
            .is_openai_compatible()
            .then(|| OpenAiSettings::from_env(env)),
    }
}
