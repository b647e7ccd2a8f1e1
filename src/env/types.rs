// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for environment variable management.
//!
//! ```text
//! EnvKey: case-insensitive on Windows (PATH == Path == path),
//!         case-sensitive elsewhere
//! DotenvEntry: one accepted KEY=VALUE line
//! ```

use std::cmp::Ordering;

/// An environment variable key that compares like the host OS does.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(String);

impl EnvKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> std::borrow::Cow<'_, str> {
        if cfg!(windows) {
            std::borrow::Cow::Owned(self.0.to_ascii_lowercase())
        } else {
            std::borrow::Cow::Borrowed(&self.0)
        }
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        if cfg!(windows) {
            self.0.eq_ignore_ascii_case(&other.0)
        } else {
            self.0 == other.0
        }
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(&other.folded())
    }
}

/// One accepted `KEY=VALUE` line of a dotenv file.
///
/// Both sides are already trimmed; the value is non-empty and does not start
/// with `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotenvEntry {
    /// 1-based line number in the source file.
    pub line: usize,
    pub key: String,
    pub value: String,
}

impl DotenvEntry {
    /// Returns the reason this entry cannot be stored in the process
    /// environment, if any.
    #[must_use]
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.key.contains('\0') {
            Some("key contains a NUL byte")
        } else if self.value.contains('\0') {
            Some("value contains a NUL byte")
        } else {
            None
        }
    }
}
