//! Axum route handlers for the voice-assistant tool endpoint.

use axum::{extract::State, response::Response, Json};
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::interview::generator::generate_interview;
use crate::interview::request::decode_request;
use crate::state::AppState;

/// POST /api/vapi/generate
///
/// Full pipeline: decode → LLM → extract/fallback → persist → envelope.
/// The body is taken raw; see `request::decode_request` for why.
/// Every outcome, error or not, goes through the configured envelope.
pub async fn handle_generate(State(state): State<AppState>, body: Bytes) -> Response {
    let raw_body = String::from_utf8_lossy(&body);
    debug!("Received raw request body: {raw_body}");

    let request = match decode_request(&raw_body) {
        Ok(request) => request,
        Err(e) => return state.formatter.failure(&e),
    };

    match generate_interview(
        &request,
        state.llm.as_ref(),
        &state.extractor,
        state.store.as_ref(),
    )
    .await
    {
        Ok(generated) => {
            info!(
                "Interview {} ready with {} question(s){}",
                generated.interview_id,
                generated.questions.len(),
                if generated.used_fallback { " (fallback)" } else { "" }
            );
            state.formatter.success(&generated.questions, &request)
        }
        Err(e) => state.formatter.failure(&e),
    }
}

/// GET /api/vapi/generate
///
/// Probe used by the voice platform when registering the tool.
pub async fn handle_generate_probe() -> Json<Value> {
    Json(json!(["API is operational"]))
}
