// Prompt constants for interview question generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::interview::extractor::QuestionCount;
use crate::interview::request::InterviewRequest;
use crate::llm_client::prompts::{JSON_ARRAY_ONLY_INSTRUCTION, VOICE_SAFE_INSTRUCTION};

/// Question generation prompt.
/// Replace: {role}, {level}, {techstack}, {type}, {amount},
///          {json_array_only_instruction}, {voice_safe_instruction}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Prepare questions for a job interview.
The job role is {role}.
The job experience level is {level}.
The tech stack used in the job is: {techstack}.
The focus between behavioural and technical questions should lean towards: {type}.
The amount of questions required is: {amount}.
{json_array_only_instruction}
{voice_safe_instruction}
Return the questions formatted like this:
["Question 1", "Question 2", "Question 3"]

Thank you!"#;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Fills the template in one pass, so caller text that looks like a
/// placeholder is never substituted again.
pub fn build_questions_prompt(request: &InterviewRequest, count: QuestionCount) -> String {
    let techstack = request.techstack.display();
    let amount = count.get().to_string();

    PLACEHOLDER_RE
        .replace_all(QUESTIONS_PROMPT_TEMPLATE, |caps: &Captures| {
            match &caps[1] {
                "json_array_only_instruction" => JSON_ARRAY_ONLY_INSTRUCTION,
                "voice_safe_instruction" => VOICE_SAFE_INSTRUCTION,
                "role" => request.role.as_str(),
                "level" => request.level.as_str(),
                "techstack" => techstack.as_str(),
                "type" => request.interview_type.as_str(),
                "amount" => amount.as_str(),
                _ => &caps[0],
            }
            .to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::request::decode_request;

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let request = decode_request(
            r#"{"role": "Backend Engineer", "level": "senior", "techstack": ["Go", "Postgres"], "type": "mixed", "amount": "0"}"#,
        )
        .unwrap();
        let prompt = build_questions_prompt(&request, request.count());

        assert!(prompt.contains("The job role is Backend Engineer."));
        assert!(prompt.contains("The job experience level is senior."));
        assert!(prompt.contains("The tech stack used in the job is: Go, Postgres."));
        assert!(prompt.contains("should lean towards: mixed."));
        assert!(prompt.contains("The amount of questions required is: 5."));
        assert!(prompt.contains("voice assistant"));
        for placeholder in ["{role}", "{level}", "{techstack}", "{type}", "{amount}", "_instruction}"] {
            assert!(!prompt.contains(placeholder), "unfilled {placeholder}");
        }
    }

    #[test]
    fn test_caller_text_with_braces_is_left_alone() {
        let request = decode_request(
            r#"{"role": "Dev {level} {techstack}", "level": "senior", "techstack": "Go"}"#,
        )
        .unwrap();
        let prompt = build_questions_prompt(&request, request.count());

        assert!(prompt.contains("The job role is Dev {level} {techstack}."));
        assert!(prompt.contains("The job experience level is senior."));
    }
}
