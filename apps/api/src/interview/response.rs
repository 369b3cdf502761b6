//! Response Formatter — the outbound envelope for the calling voice platform.
//!
//! Two consumers, two shapes:
//! - `PlainArray`: the body *is* the tool result, `["Q1?", "Q2?"]`.
//! - `Wrapped`: `{"result": "<JSON-encoded summary>"}`, for platforms that
//!   expect a single string field.
//!
//! The mode is fixed per deployment (`RESPONSE_MODE`).

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::interview::request::InterviewRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    #[default]
    PlainArray,
    Wrapped,
}

impl FromStr for ResponseMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain_array" | "plain" | "array" => Ok(ResponseMode::PlainArray),
            "wrapped" | "object" => Ok(ResponseMode::Wrapped),
            other => anyhow::bail!("unknown response mode '{other}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter {
    mode: ResponseMode,
}

impl ResponseFormatter {
    pub fn new(mode: ResponseMode) -> Self {
        Self { mode }
    }

    pub fn success(&self, questions: &[String], request: &InterviewRequest) -> Response {
        (StatusCode::OK, Json(self.success_payload(questions, request))).into_response()
    }

    pub fn failure(&self, error: &AppError) -> Response {
        let status = error.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {error}");
        } else {
            tracing::warn!("Request rejected: {error}");
        }
        (status, Json(self.failure_payload(&error.to_string()))).into_response()
    }

    pub fn success_payload(&self, questions: &[String], request: &InterviewRequest) -> Value {
        match self.mode {
            ResponseMode::PlainArray => json!(questions),
            ResponseMode::Wrapped => wrap(json!({
                "success": true,
                "message": format!(
                    "Generated {} interview questions for {}",
                    questions.len(),
                    request.role
                ),
                "questionCount": questions.len(),
                "questions": questions,
                "role": request.role,
                "level": request.level,
                "type": request.interview_type,
                "techstack": request.techstack.to_list(),
            })),
        }
    }

    pub fn failure_payload(&self, message: &str) -> Value {
        match self.mode {
            ResponseMode::PlainArray => json!([format!("Error: {message}")]),
            ResponseMode::Wrapped => wrap(json!({
                "success": false,
                "error": message,
            })),
        }
    }
}

fn wrap(summary: Value) -> Value {
    json!({ "result": summary.to_string() })
}
