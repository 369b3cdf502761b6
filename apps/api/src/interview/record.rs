//! Record Builder — assembles the persisted interview document.

use chrono::Utc;

use crate::interview::request::InterviewRequest;
use crate::models::interview::InterviewRecord;

/// Builds the record for a finished request. Role, level and type pass
/// through as given; only the tech stack is normalized.
pub fn build_record(
    request: &InterviewRequest,
    questions: Vec<String>,
    cover_image: String,
) -> InterviewRecord {
    InterviewRecord {
        role: request.role.clone(),
        interview_type: request.interview_type.clone(),
        level: request.level.clone(),
        techstack: request.techstack.to_list(),
        questions,
        user_id: request.userid.clone(),
        finalized: true,
        cover_image,
        created_at: Utc::now(),
    }
}
