//! Denylist — lowercase substrings that disqualify a candidate question.
//!
//! Models leak their reasoning ("Okay, let me draft them...") into the output.
//! Anything containing one of these substrings is not read aloud.

use std::collections::HashSet;

/// Default entries. Broad words like "first" also catch legitimate questions;
/// override via `QUESTION_DENYLIST` when that matters.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "<think>",
    "</think>",
    "okay",
    "let me",
    "first",
    "second",
    "third",
    "behavioral questions",
    "technical questions",
    "example response",
    "generate",
    "instructions",
];

/// Minimum length (exclusive, in chars) for a question to be kept.
pub const MIN_QUESTION_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    entries: HashSet<String>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

impl Denylist {
    /// Builds a denylist from arbitrary entries. Entries are trimmed and
    /// lowercased; blank entries are ignored.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Parses a comma-separated list, e.g. from an environment variable.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the text contains any denylisted substring (case-insensitive).
    pub fn is_denied(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.entries.iter().any(|entry| lower.contains(entry.as_str()))
    }

    /// Full validity check for a candidate question:
    /// non-empty, longer than `MIN_QUESTION_CHARS`, contains '?', not denied.
    pub fn accepts(&self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        !trimmed.is_empty()
            && trimmed.chars().count() > MIN_QUESTION_CHARS
            && trimmed.contains('?')
            && !self.is_denied(trimmed)
    }
}
