//! Extraction strategies — independent ways of turning raw model text into
//! candidate questions.
//!
//! Each strategy is a plain `fn(&str) -> Vec<String>` returning raw candidates.
//! Validation (length, '?', denylist) and truncation happen in the extractor,
//! so a strategy never needs to know about either.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::interview::denylist::MIN_QUESTION_CHARS;
use crate::llm_client::strip_json_fences;

pub type StrategyFn = fn(&str) -> Vec<String>;

/// A named strategy. The name only shows up in logs.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: StrategyFn,
}

/// Default cascade, in priority order. Structured parses first, then the
/// line scrapers from most to least specific.
pub const DEFAULT_STRATEGIES: &[Strategy] = &[
    Strategy { name: "whole_json", run: whole_json },
    Strategy { name: "embedded_array", run: embedded_array },
    Strategy { name: "quoted_questions", run: quoted_questions },
    Strategy { name: "numbered_lines", run: numbered_lines },
    Strategy { name: "dash_bullets", run: dash_bullets },
    Strategy { name: "asterisk_bullets", run: asterisk_bullets },
    Strategy { name: "capitalized_sentences", run: capitalized_sentences },
];

static EMBEDDED_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\[\s*(?:"(?:[^"\\]|\\.)*"|'[^']*')(?:\s*,\s*(?:"(?:[^"\\]|\\.)*"|'[^']*'))*\s*,?\s*\]"#,
    )
    .expect("valid regex")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static QUOTED_QUESTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["“][^"”\n]+?\?["”]|'[^'\n]+?\?'"#).expect("valid regex")
});

static NUMBERED_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+\.[ \t]*[^\n]*\?[ \t\r]*$").expect("valid regex")
});

static DASH_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*-[ \t]*[^\n]*\?[ \t\r]*$").expect("valid regex"));

static ASTERISK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\*+[ \t]*[^\n]*\?[ \t\r]*$").expect("valid regex"));

static CAPITALIZED_SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][^.!?\n]*\?").expect("valid regex"));

static LEADING_MARKUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\d.\-*"'“”‘’\s]+"#).expect("valid regex"));

static TRAILING_QUOTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'“”‘’\s]+$"#).expect("valid regex"));

// ────────────────────────────────────────────────────────────────────────────
// Structured strategies
// ────────────────────────────────────────────────────────────────────────────

/// The whole response (minus a markdown fence) is a JSON array.
pub fn whole_json(text: &str) -> Vec<String> {
    parse_string_array(strip_json_fences(text)).unwrap_or_default()
}

/// The first bracketed list of quoted strings anywhere in the text.
/// Retries once with whitespace collapsed, which repairs raw newlines
/// inside string literals.
pub fn embedded_array(text: &str) -> Vec<String> {
    let Some(m) = EMBEDDED_ARRAY_RE.find(text) else {
        return Vec::new();
    };

    parse_string_array(m.as_str())
        .or_else(|| parse_string_array(&WHITESPACE_RE.replace_all(m.as_str(), " ")))
        .unwrap_or_default()
}

/// Parses a JSON array and keeps its string elements, with list markup
/// stripped. `None` if the text is not a JSON array at all.
fn parse_string_array(text: &str) -> Option<Vec<String>> {
    let values: Vec<Value> = serde_json::from_str(text.trim()).ok()?;
    Some(
        values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(clean_markup(&s)),
                _ => None,
            })
            .collect(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Line scrapers
// ────────────────────────────────────────────────────────────────────────────

pub fn quoted_questions(text: &str) -> Vec<String> {
    scrape(&QUOTED_QUESTION_RE, text)
}

pub fn numbered_lines(text: &str) -> Vec<String> {
    scrape(&NUMBERED_LINE_RE, text)
}

pub fn dash_bullets(text: &str) -> Vec<String> {
    scrape(&DASH_LINE_RE, text)
}

pub fn asterisk_bullets(text: &str) -> Vec<String> {
    scrape(&ASTERISK_LINE_RE, text)
}

pub fn capitalized_sentences(text: &str) -> Vec<String> {
    scrape(&CAPITALIZED_SENTENCE_RE, text)
}

fn scrape(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| clean_markup(m.as_str()))
        .filter(|q| q.chars().count() > MIN_QUESTION_CHARS)
        .collect()
}

/// Strips leading list markup (digits, dots, dashes, asterisks, quotes) and
/// trailing quotes.
pub fn clean_markup(raw: &str) -> String {
    let without_lead = LEADING_MARKUP_RE.replace(raw, "");
    let without_trail = TRAILING_QUOTES_RE.replace(&without_lead, "");
    without_trail.trim().to_string()
}
