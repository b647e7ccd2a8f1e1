// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dotenv file parsing and loading.
//!
//! ```text
//! KEY=VALUE      → ("KEY", "VALUE")        split at the first '='
//!   KEY = a=b    → ("KEY", "a=b")          both sides trimmed
//! KEY=           → skipped                 empty value
//! KEY=#off       → skipped                 '#'-prefixed value
//! no equals sign → skipped
//! =value         → skipped                 empty key (warned)
//! KEY="a b"      → ("KEY", "\"a b\"")      no quote handling
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::container::Env;
use super::types::DotenvEntry;
use crate::error::{AgentError, AgentResult, EnvFileError};

/// Why a dotenv line was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `=` on the line (blank lines and comments included).
    NoSeparator,
    /// The value is empty after trimming.
    EmptyValue,
    /// The value starts with `#`.
    Disabled,
    /// The key is empty after trimming.
    EmptyKey,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoSeparator => "no '=' separator",
            Self::EmptyValue => "empty value",
            Self::Disabled => "value starts with '#'",
            Self::EmptyKey => "empty key",
        }
    }
}

/// Parses dotenv content into the accepted entries, in file order.
///
/// Duplicate keys are all returned; applying them in order makes the last
/// occurrence win.
#[must_use]
pub fn parse_dotenv(content: &str) -> Vec<DotenvEntry> {
    scan(content).0
}

fn scan(content: &str) -> (Vec<DotenvEntry>, Vec<(usize, SkipReason)>) {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for (index, line) in content.lines().enumerate() {
        match parse_line(index + 1, line) {
            Ok(entry) => entries.push(entry),
            Err(reason) => skipped.push((index + 1, reason)),
        }
    }
    (entries, skipped)
}

fn parse_line(line_no: usize, line: &str) -> Result<DotenvEntry, SkipReason> {
    let (key, value) = line.split_once('=').ok_or(SkipReason::NoSeparator)?;

    let value = value.trim();
    if value.is_empty() {
        return Err(SkipReason::EmptyValue);
    }
    if value.starts_with('#') {
        return Err(SkipReason::Disabled);
    }

    let key = key.trim();
    if key.is_empty() {
        return Err(SkipReason::EmptyKey);
    }

    Ok(DotenvEntry {
        line: line_no,
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// A parsed dotenv file.
#[derive(Debug, Clone, Default)]
pub struct DotenvFile {
    path: PathBuf,
    entries: Vec<DotenvEntry>,
    skipped: Vec<(usize, SkipReason)>,
    missing: bool,
}

impl DotenvFile {
    /// Reads and parses the dotenv file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `EnvFileError::Read` if the file cannot be read,
    /// `EnvFileError::NotUtf8` if it is not UTF-8, and
    /// `EnvFileError::InvalidLine` if an entry contains a NUL byte.
    pub fn load(path: impl AsRef<Path>) -> AgentResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| EnvFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| EnvFileError::NotUtf8 {
            path: path.to_path_buf(),
        })?;

        Self::from_content(path, &content)
    }

    /// Like [`DotenvFile::load`], but a file that does not exist yields an
    /// empty `DotenvFile` marked as missing.
    ///
    /// # Errors
    ///
    /// Same as [`DotenvFile::load`], except for `NotFound`.
    pub fn load_optional(path: impl AsRef<Path>) -> AgentResult<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(AgentError::EnvFile(err))
                if matches!(
                    err.as_ref(),
                    EnvFileError::Read { source, .. }
                        if source.kind() == std::io::ErrorKind::NotFound
                ) =>
            {
                Ok(Self {
                    missing: true,
                    ..Self::empty(path)
                })
            }
            other => other,
        }
    }

    /// Parses in-memory content as if it had been read from `path`.
    ///
    /// # Errors
    ///
    /// Returns `EnvFileError::InvalidLine` if an entry contains a NUL byte.
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> AgentResult<Self> {
        let path = path.into();
        let (entries, skipped) = scan(content);

        if let Some((entry, reason)) = entries
            .iter()
            .find_map(|entry| entry.invalid_reason().map(|reason| (entry, reason)))
        {
            return Err(EnvFileError::InvalidLine {
                path,
                line: entry.line,
                reason,
            }
            .into());
        }

        Ok(Self {
            path,
            entries,
            skipped,
            missing: false,
        })
    }

    /// An empty file record for `path`.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            skipped: Vec::new(),
            missing: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accepted entries in file order, duplicates included.
    #[must_use]
    pub fn entries(&self) -> &[DotenvEntry] {
        &self.entries
    }

    /// Lines that were not applied, with the reason.
    #[must_use]
    pub fn skipped(&self) -> &[(usize, SkipReason)] {
        &self.skipped
    }

    /// Whether [`DotenvFile::load_optional`] found no file at `path`.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.missing
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logs what was loaded and skipped.
    ///
    /// Loading happens before logging is initialized, so this runs later.
    pub fn log_summary(&self) {
        if self.missing {
            warn!(path = %self.path.display(), "dotenv file not found, continuing without it");
            return;
        }
        debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            skipped = self.skipped.len(),
            "loaded dotenv file"
        );
        for (line, reason) in &self.skipped {
            match reason {
                SkipReason::EmptyKey => {
                    warn!(path = %self.path.display(), line, "skipping dotenv line with an empty key");
                }
                _ => trace!(line, reason = reason.as_str(), "skipped dotenv line"),
            }
        }
    }

    /// Overlays every entry onto `env`; later entries replace earlier ones.
    pub fn apply_to(&self, env: &mut Env) {
        for entry in &self.entries {
            env.set(entry.key.as_str(), entry.value.as_str());
        }
    }

    /// Writes every entry into the process environment.
    ///
    /// # Safety
    ///
    /// Must be called while no other thread reads or writes the process
    /// environment, i.e. before any runtime, logger worker or other thread
    /// is started. See [`std::env::set_var`].
    pub unsafe fn export(&self) {
        for entry in &self.entries {
            // SAFETY: upheld by the caller; keys are non-empty, contain no
            // '=' and, like values, no NUL byte (checked in from_content).
            unsafe { std::env::set_var(&entry.key, &entry.value) };
        }
    }
}
