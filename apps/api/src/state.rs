use std::sync::Arc;

use crate::interview::extractor::QuestionExtractor;
use crate::interview::response::ResponseFormatter;
use crate::interview::store::InterviewStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Default: `LlmClient` for the configured provider.
    pub llm: Arc<dyn TextGenerator>,
    /// Pluggable interview store. Default: `PgInterviewStore`.
    pub store: Arc<dyn InterviewStore>,
    /// Immutable extraction config (denylist + strategy cascade), shared by every request.
    pub extractor: Arc<QuestionExtractor>,
    /// Outbound envelope, fixed per deployment.
    pub formatter: ResponseFormatter,
}
