/// LLM Client — the single point of entry for all model calls.
///
/// ARCHITECTURAL RULE: No other module may call a model provider directly.
/// Callers depend on the `TextGenerator` trait, never on the HTTP dialect.
///
/// Two provider dialects share one retry loop:
/// - `ChatCompletions`: OpenAI-compatible chat endpoint (Hugging Face router by default)
/// - `GenerativeContent`: `models/{model}:generateContent`
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const CHAT_COMPLETIONS_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const GENERATIVE_CONTENT_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "HuggingFaceTB/SmolLM3-3B";
pub const DEFAULT_GENERATIVE_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM provider error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM provider rate limited after {retries} attempts: {message}")]
    RateLimited { retries: u32, message: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LlmProvider {
    #[default]
    ChatCompletions,
    GenerativeContent,
}

impl LlmProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::ChatCompletions => DEFAULT_CHAT_MODEL,
            LlmProvider::GenerativeContent => DEFAULT_GENERATIVE_MODEL,
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::ChatCompletions => CHAT_COMPLETIONS_URL,
            LlmProvider::GenerativeContent => GENERATIVE_CONTENT_URL,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat_completions" | "huggingface" | "openai" => Ok(LlmProvider::ChatCompletions),
            "generative_content" | "gemini" | "google" => Ok(LlmProvider::GenerativeContent),
            other => anyhow::bail!("unknown LLM provider '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    /// Full URL for chat completions; API root for generative content.
    pub endpoint: String,
    pub max_tokens: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types — chat completions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types — generative content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Anything that turns a prompt into model text. `AppState` carries an
/// `Arc<dyn TextGenerator>` so handlers can run against a stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// The single LLM client used by the service.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn provider(&self) -> LlmProvider {
        self.settings.provider
    }

    /// Sends one prompt and returns the generated text.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff;
    /// the error from the final attempt is returned.
    /// A success with no text comes back as an empty string.
    pub async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let mut attempt = 1;

        loop {
            let error = match self.build_request(prompt).send().await {
                Err(e) => LlmError::Http(e),
                Ok(response) => {
                    let status = response.status().as_u16();

                    if is_retryable(status) {
                        let body = response.text().await.unwrap_or_default();
                        warn!("LLM API returned {}: {}", status, body);
                        retryable_failure(status, body)
                    } else if !response.status().is_success() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(LlmError::Api {
                            status,
                            message: body,
                        });
                    } else {
                        let body = response.text().await?;
                        let text = match self.settings.provider {
                            LlmProvider::ChatCompletions => parse_chat_completion(&body)?,
                            LlmProvider::GenerativeContent => parse_generate_content(&body)?,
                        };

                        if text.trim().is_empty() {
                            warn!("LLM returned empty content (model: {})", self.settings.model);
                        }

                        return Ok(text);
                    }
                }
            };

            if attempt >= MAX_RETRIES {
                return Err(error);
            }

            // Exponential backoff: 1s, 2s
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "LLM call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn build_request(&self, prompt: &str) -> RequestBuilder {
        let settings = &self.settings;
        match settings.provider {
            LlmProvider::ChatCompletions => self
                .client
                .post(&settings.endpoint)
                .bearer_auth(&settings.api_key)
                .json(&ChatRequest {
                    model: &settings.model,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                    max_tokens: settings.max_tokens,
                }),
            LlmProvider::GenerativeContent => self
                .client
                .post(generate_content_url(&settings.endpoint, &settings.model))
                .header("x-goog-api-key", &settings.api_key)
                .json(&GenerateContentRequest {
                    contents: vec![Content {
                        role: "user",
                        parts: vec![Part { text: prompt }],
                    }],
                    generation_config: GenerationConfig {
                        max_output_tokens: settings.max_tokens,
                    },
                }),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt).await
    }
}

fn generate_content_url(root: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", root.trim_end_matches('/'), model)
}

/// Text of the first choice, or empty.
fn parse_chat_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default())
}

/// Concatenated text parts of the first candidate, or empty.
fn parse_generate_content(body: &str) -> Result<String, LlmError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Error recorded for a retryable status. If it is the last attempt, this is
/// what the caller sees.
fn retryable_failure(status: u16, message: String) -> LlmError {
    if status == 429 {
        LlmError::RateLimited {
            retries: MAX_RETRIES,
            message,
        }
    } else {
        LlmError::Api { status, message }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[\"What is Rust?\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"What is Rust?\"]");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n[\"What is Rust?\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"What is Rust?\"]");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "[\"What is Rust?\"]";
        assert_eq!(strip_json_fences(input), "[\"What is Rust?\"]");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "chat_completions".parse::<LlmProvider>().unwrap(),
            LlmProvider::ChatCompletions
        );
        assert_eq!(
            "Gemini".parse::<LlmProvider>().unwrap(),
            LlmProvider::GenerativeContent
        );
        assert!("carrier-pigeon".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(LlmProvider::ChatCompletions.default_model(), DEFAULT_CHAT_MODEL);
        assert_eq!(
            LlmProvider::GenerativeContent.default_endpoint(),
            GENERATIVE_CONTENT_URL
        );
    }

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta/", "gemini-2.0-flash"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_parse_chat_completion() {
        let body = r#"{
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "[\"What is Rust?\"]"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 14, "total_tokens": 134}
        }"#;
        assert_eq!(parse_chat_completion(body).unwrap(), "[\"What is Rust?\"]");
    }

    #[test]
    fn test_parse_chat_completion_without_content_is_empty() {
        assert_eq!(parse_chat_completion(r#"{"choices": []}"#).unwrap(), "");
        assert_eq!(
            parse_chat_completion(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap(),
            ""
        );
    }

    #[test]
    fn test_parse_chat_completion_rejects_garbage() {
        assert!(matches!(
            parse_chat_completion("<html>502</html>"),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_generate_content_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "[\"What is "}, {"text": "Rust?\"]"}]},
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(parse_generate_content(body).unwrap(), "[\"What is Rust?\"]");
    }

    #[test]
    fn test_parse_generate_content_blocked_is_empty() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(parse_generate_content(body).unwrap(), "");
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(429));
        assert!(is_retryable(500));
        assert!(is_retryable(503));
        assert!(!is_retryable(401));
        assert!(!is_retryable(404));
    }

    #[test]
    fn test_rate_limit_on_last_attempt_surfaces_as_rate_limited() {
        let err = retryable_failure(429, "slow down".to_string());
        assert!(matches!(
            err,
            LlmError::RateLimited { retries: MAX_RETRIES, ref message } if message == "slow down"
        ));
        assert_eq!(
            err.to_string(),
            "LLM provider rate limited after 3 attempts: slow down"
        );

        let err = retryable_failure(503, "overloaded".to_string());
        assert_eq!(err.to_string(), "LLM provider error: 503 - overloaded");
    }

    #[test]
    fn test_client_builds() {
        let client = LlmClient::new(LlmSettings {
            provider: LlmProvider::ChatCompletions,
            api_key: "test".to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
        .unwrap();
        assert_eq!(client.model(), DEFAULT_CHAT_MODEL);
        assert_eq!(client.provider(), LlmProvider::ChatCompletions);
    }
}
