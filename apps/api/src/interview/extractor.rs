//! Question Extractor — turns an arbitrarily shaped model response into a
//! bounded, ordered list of speakable questions.
//!
//! Algorithm:
//! 1. Drop closed `<think>…</think>` blocks.
//! 2. Run each strategy in order; the first one whose candidates survive
//!    validation wins.
//! 3. Filter (length, '?', denylist), then truncate to the requested count.
//!
//! Never fails. An empty result means "use the fallback questions".

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::interview::denylist::Denylist;
use crate::interview::strategies::{Strategy, DEFAULT_STRATEGIES};

/// Requested question count when the caller gives none or an unusable one.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

static THINK_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").expect("valid regex"));

/// A positive number of questions. Anything non-positive or non-numeric
/// becomes `DEFAULT_QUESTION_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCount(usize);

impl Default for QuestionCount {
    fn default() -> Self {
        Self(DEFAULT_QUESTION_COUNT)
    }
}

impl QuestionCount {
    pub fn new(n: i64) -> Self {
        usize::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .map(Self)
            .unwrap_or_default()
    }

    /// Reads a count from a loosely typed request field: `5`, `"5"`, `5.0`.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Self::new)
                .unwrap_or_default(),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Self::new)
                .unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Extraction pipeline. Holds only immutable configuration, so one instance
/// is shared across all requests.
#[derive(Clone)]
pub struct QuestionExtractor {
    denylist: Denylist,
    strategies: Vec<Strategy>,
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new(Denylist::default())
    }
}

impl QuestionExtractor {
    pub fn new(denylist: Denylist) -> Self {
        Self {
            denylist,
            strategies: DEFAULT_STRATEGIES.to_vec(),
        }
    }

    /// Replaces the strategy cascade. Order is priority order.
    #[allow(dead_code)]
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    pub fn extract(&self, raw_text: &str, count: QuestionCount) -> Vec<String> {
        let text = THINK_BLOCK_RE.replace_all(raw_text, "");

        for strategy in &self.strategies {
            let questions = self.finalize((strategy.run)(&text), count);
            if !questions.is_empty() {
                debug!(
                    "Extraction strategy '{}' produced {} question(s)",
                    strategy.name,
                    questions.len()
                );
                return questions;
            }
        }

        debug!("No extraction strategy produced a usable question");
        Vec::new()
    }

    /// Filters before truncating, so denied candidates never use up a slot.
    fn finalize(&self, candidates: Vec<String>, count: QuestionCount) -> Vec<String> {
        candidates
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| self.denylist.accepts(c))
            .take(count.get())
            .collect()
    }
}
