// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      AgentError (~16 bytes)
//!             |
//!     +-------+-------+
//!     |       |       |
//!     v       v       v
//!    Cfg    EnvF    Repl
//!    Box    Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, InvalidValue, InvalidOverride, MissingCredential
//!   EnvFile  Read, NotUtf8, InvalidLine
//!   Repl     Prompt, Read, Signal, Responder
//!
//! All variants boxed => AgentError fits in 16 bytes.
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AgentError`].
pub type AgentResult<T> = std::result::Result<T, AgentError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Settings or credential error.
    #[error(transparent)]
    Config(#[from] Box<ConfigError>),

    /// Dotenv file error.
    #[error(transparent)]
    EnvFile(#[from] Box<EnvFileError>),

    /// Prompt loop error.
    #[error(transparent)]
    Repl(#[from] Box<ReplError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AgentError {
                fn from(err: $error) -> Self {
                    AgentError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    EnvFileError => EnvFile,
    ReplError => Repl,
}

// --- Config Errors ---

/// Settings and credential errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse or merge the settings sources.
    #[error("failed to load settings: {message}")]
    ParseError { message: String },

    /// Invalid settings value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Malformed `--set` override.
    #[error("invalid override '{0}', expected SECTION/KEY=VALUE")]
    InvalidOverride(String),

    /// The required credential variable is unset or empty after loading.
    #[error("missing {var} in {}", .env_file.display())]
    MissingCredential { var: String, env_file: PathBuf },
}

// --- Dotenv Errors ---

/// Errors raised while reading a dotenv file.
#[derive(Debug, Error)]
pub enum EnvFileError {
    /// The file could not be read.
    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("{} is not valid UTF-8", .path.display())]
    NotUtf8 { path: PathBuf },

    /// A line cannot be represented in the process environment.
    #[error("{}:{line}: {reason}", .path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },
}

// --- Repl Errors ---

/// Prompt loop errors.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Writing the prompt or a reply failed.
    #[error("failed to write prompt")]
    Prompt(#[source] std::io::Error),

    /// Reading a line of input failed.
    #[error("failed to read input")]
    Read(#[source] std::io::Error),

    /// The Ctrl+C handler could not be installed.
    #[error("failed to install Ctrl+C handler")]
    Signal(#[source] std::io::Error),

    /// The responder rejected a line.
    #[error("responder failed: {0}")]
    Responder(String),
}
