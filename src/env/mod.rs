// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! DotenvFile::load(.env) ──parse_dotenv──> [DotenvEntry]
//!        |                                     |
//!        | export() (process env, once)        | apply_to()
//!        v                                     v
//!   std::env                    Env (process snapshot + entries)
//! ```
//!
//! - **Last occurrence wins** for duplicate keys
//! - **Inherited**: process values not overwritten by the file survive
//! - **Case-insensitive on Windows**
//! - `LoadedEnv` keeps the file and the overlaid snapshot together

pub mod container;
pub mod dotenv;
pub mod types;


pub use container::Env;
pub use dotenv::{DotenvFile, SkipReason, parse_dotenv};
pub use types::DotenvEntry;

use crate::config::types::AgentConfig;
use crate::error::AgentResult;

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> Env {
    Env::from_process()
}

/// Loads the dotenv file named by `agent.env_file`.
///
/// # Errors
///
/// Returns an `EnvFileError` when the file is unreadable (or missing while
/// `agent.require_env_file` is set) or holds a line the process environment
/// cannot store.
pub fn load_env_file(agent: &AgentConfig) -> AgentResult<DotenvFile> {
    if agent.require_env_file {
        DotenvFile::load(&agent.env_file)
    } else {
        DotenvFile::load_optional(&agent.env_file)
    }
}

/// Returns `base` with the entries of `file` applied on top.
#[must_use]
pub fn overlay(base: Env, file: &DotenvFile) -> Env {
    let mut env = base;
    file.apply_to(&mut env);
    env
}

/// A dotenv file together with the environment it produces.
#[derive(Debug, Clone)]
pub struct LoadedEnv {
    file: DotenvFile,
    env: Env,
}

impl LoadedEnv {
    /// Loads `agent.env_file` and overlays it on the current process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`load_env_file`].
    pub fn load(agent: &AgentConfig) -> AgentResult<Self> {
        let file = load_env_file(agent)?;
        Ok(Self::new(current_env(), file))
    }

    #[must_use]
    pub fn new(base: Env, file: DotenvFile) -> Self {
        let env = overlay(base, &file);
        Self { file, env }
    }

    #[must_use]
    pub const fn file(&self) -> &DotenvFile {
        &self.file
    }

    /// The process snapshot with the file applied.
    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    /// Exports the file entries to the process environment.
    ///
    /// # Safety
    ///
    /// Same contract as [`DotenvFile::export`]: no other thread may exist.
    pub unsafe fn export(&self) {
        // SAFETY: forwarded to the caller.
        unsafe { self.file.export() };
    }
}
