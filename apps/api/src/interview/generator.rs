//! Interview generation — orchestrates the full pipeline for one request.
//!
//! Flow: decode body → build prompt → LLM → extract (or fallback) →
//!       build record → persist → return questions.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::covers::random_interview_cover;
use crate::interview::extractor::QuestionExtractor;
use crate::interview::fallback::fallback_questions;
use crate::interview::prompts::build_questions_prompt;
use crate::interview::record::build_record;
use crate::interview::request::InterviewRequest;
use crate::interview::store::InterviewStore;
use crate::llm_client::TextGenerator;

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedInterview {
    pub interview_id: Uuid,
    pub questions: Vec<String>,
    pub used_fallback: bool,
}

/// Runs the pipeline for an already-decoded request.
///
/// An empty extraction is not an error: the fallback questions take over,
/// so a successful return always carries at least one question.
pub async fn generate_interview(
    request: &InterviewRequest,
    llm: &dyn TextGenerator,
    extractor: &QuestionExtractor,
    store: &dyn InterviewStore,
) -> Result<GeneratedInterview, AppError> {
    let count = request.count();
    let prompt = build_questions_prompt(request, count);

    let raw_text = llm.generate(&prompt).await?;
    debug!("LLM raw response ({} chars): {}", raw_text.len(), raw_text);

    let mut questions = extractor.extract(&raw_text, count);
    let used_fallback = questions.is_empty();
    if used_fallback {
        warn!(
            "No usable questions in LLM response for role '{}'; using fallback questions",
            request.role
        );
        questions = fallback_questions(&request.role, &request.techstack.display(), count);
    }

    let record = build_record(request, questions, random_interview_cover());
    let interview_id = store.save(&record).await?;

    Ok(GeneratedInterview {
        interview_id,
        questions: record.questions,
        used_fallback,
    })
}
