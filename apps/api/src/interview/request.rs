//! Inbound request decoding.
//!
//! Voice platforms occasionally deliver the tool arguments with stray text
//! around the JSON object, so the body is read raw and the object is cut out
//! between the first '{' and the last '}'.

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::interview::extractor::QuestionCount;

/// Tech stack as sent by the caller: either "Go, Postgres" or ["Go", "Postgres"].
#[derive(Debug, Clone, PartialEq)]
pub enum TechStack {
    List(Vec<String>),
    Text(String),
}

impl Default for TechStack {
    fn default() -> Self {
        TechStack::Text(String::new())
    }
}

impl TechStack {
    /// Strings and arrays map directly. Scalars are stringified, array
    /// elements that are not scalars are skipped, and anything else is
    /// the empty default.
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => {
                TechStack::List(items.iter().filter_map(scalar_text).collect())
            }
            Some(v) => scalar_text(v).map(TechStack::Text).unwrap_or_default(),
            None => TechStack::default(),
        }
    }

    /// Human-readable form for prompts and fallback questions.
    pub fn display(&self) -> String {
        match self {
            TechStack::Text(s) => s.trim().to_string(),
            TechStack::List(items) => items.join(", "),
        }
    }

    /// Comma-delimited text is split and each segment trimmed; a list passes
    /// through unchanged. Empty segments are dropped, so `""` gives `[]`
    /// rather than `[""]`.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            TechStack::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            TechStack::List(items) => items.clone(),
        }
    }
}

/// Decoded request body for POST /api/vapi/generate.
#[derive(Debug, Clone)]
pub struct InterviewRequest {
    pub interview_type: String,
    pub role: String,
    pub level: String,
    pub techstack: TechStack,
    /// Loosely typed: callers send 5, "5" or garbage.
    pub amount: Option<Value>,
    pub userid: String,
}

impl InterviewRequest {
    /// Field values are taken as loosely as the caller sends them: numbers
    /// and bools become strings, null or missing takes the default.
    fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str, default: &str| {
            object
                .get(key)
                .and_then(scalar_text)
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            interview_type: text("type", "technical"),
            role: text("role", "Software Engineer"),
            level: text("level", "mid"),
            techstack: TechStack::from_json(object.get("techstack")),
            amount: object.get("amount").filter(|v| !v.is_null()).cloned(),
            userid: text("userid", "anonymous"),
        }
    }

    pub fn count(&self) -> QuestionCount {
        QuestionCount::from_json(self.amount.as_ref())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decodes a raw request body. Only a missing object or unparseable JSON is
/// a `BadRequest`; odd field types fall back to defaults.
pub fn decode_request(raw_body: &str) -> Result<InterviewRequest, AppError> {
    let (Some(start), Some(end)) = (raw_body.find('{'), raw_body.rfind('}')) else {
        return Err(AppError::BadRequest(
            "Request must contain a JSON object".to_string(),
        ));
    };

    if end < start {
        return Err(AppError::BadRequest(
            "Request must contain a JSON object".to_string(),
        ));
    }

    let object: Map<String, Value> = serde_json::from_str(&raw_body[start..=end])
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON format - {e}")))?;

    Ok(InterviewRequest::from_object(&object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let req = decode_request("{}").unwrap();
        assert_eq!(req.interview_type, "technical");
        assert_eq!(req.role, "Software Engineer");
        assert_eq!(req.level, "mid");
        assert_eq!(req.techstack, TechStack::Text(String::new()));
        assert_eq!(req.count().get(), 5);
        assert_eq!(req.userid, "anonymous");
    }

    #[test]
    fn test_full_request() {
        let body = r#"{
            "type": "mixed",
            "role": "Backend Engineer",
            "level": "senior",
            "techstack": "Go, Postgres",
            "amount": "3",
            "userid": "user-42"
        }"#;
        let req = decode_request(body).unwrap();
        assert_eq!(req.interview_type, "mixed");
        assert_eq!(req.role, "Backend Engineer");
        assert_eq!(req.level, "senior");
        assert_eq!(req.techstack.display(), "Go, Postgres");
        assert_eq!(req.count().get(), 3);
        assert_eq!(req.userid, "user-42");
    }

    #[test]
    fn test_stray_text_around_object() {
        let body = "tool args: {\"role\": \"SRE\", \"amount\": 2} <end>";
        let req = decode_request(body).unwrap();
        assert_eq!(req.role, "SRE");
        assert_eq!(req.count().get(), 2);
    }

    #[test]
    fn test_techstack_as_list() {
        let req = decode_request(r#"{"techstack": ["Rust", "Tokio"]}"#).unwrap();
        assert_eq!(req.techstack.display(), "Rust, Tokio");
        assert_eq!(req.techstack.to_list(), vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_techstack_text_split_and_trimmed() {
        let stack = TechStack::Text(" React , Node.js,,TypeScript ".to_string());
        assert_eq!(stack.to_list(), vec!["React", "Node.js", "TypeScript"]);
        assert!(TechStack::default().to_list().is_empty());
    }

    #[test]
    fn test_non_string_fields_are_stringified() {
        let req = decode_request(r#"{"role": "SRE", "userid": 42, "level": true}"#).unwrap();
        assert_eq!(req.role, "SRE");
        assert_eq!(req.userid, "42");
        assert_eq!(req.level, "true");
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let req = decode_request(
            r#"{"role": null, "type": null, "techstack": null, "amount": null, "userid": null}"#,
        )
        .unwrap();
        assert_eq!(req.role, "Software Engineer");
        assert_eq!(req.interview_type, "technical");
        assert_eq!(req.techstack, TechStack::default());
        assert_eq!(req.count().get(), 5);
        assert_eq!(req.userid, "anonymous");
    }

    #[test]
    fn test_odd_techstack_shapes() {
        let req = decode_request(r#"{"techstack": ["Rust", 2021, null, {"x": 1}]}"#).unwrap();
        assert_eq!(req.techstack.to_list(), vec!["Rust", "2021"]);

        let req = decode_request(r#"{"techstack": {"lang": "Go"}}"#).unwrap();
        assert_eq!(req.techstack, TechStack::default());
    }

    #[test]
    fn test_missing_object_is_bad_request() {
        let err = decode_request("role=SRE").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Request must contain a JSON object"));

        let err = decode_request("} reversed {").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_invalid_json_is_bad_request() {
        let err = decode_request(r#"{"role": }"#).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.starts_with("Invalid JSON format - ")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
