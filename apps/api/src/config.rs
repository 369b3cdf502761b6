use anyhow::{Context, Result};

use crate::interview::denylist::Denylist;
use crate::interview::response::ResponseMode;
use crate::llm_client::{LlmProvider, LlmSettings, DEFAULT_MAX_TOKENS};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm: LlmSettings,
    pub response_mode: ResponseMode,
    pub denylist: Denylist,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let provider = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse::<LlmProvider>().context("LLM_PROVIDER is invalid")?,
            None => LlmProvider::default(),
        };

        let llm = LlmSettings {
            provider,
            api_key: require("LLM_API_KEY")?,
            model: get("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string()),
            endpoint: get("LLM_BASE_URL")
                .unwrap_or_else(|| provider.default_endpoint().to_string()),
            max_tokens: match get("LLM_MAX_TOKENS") {
                Some(raw) => raw
                    .parse::<u32>()
                    .context("LLM_MAX_TOKENS must be a positive integer")?,
                None => DEFAULT_MAX_TOKENS,
            },
        };

        let response_mode = match get("RESPONSE_MODE") {
            Some(raw) => raw
                .parse::<ResponseMode>()
                .context("RESPONSE_MODE is invalid")?,
            None => ResponseMode::default(),
        };

        let denylist = get("QUESTION_DENYLIST")
            .map(|raw| Denylist::from_csv(&raw))
            .unwrap_or_default();

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            llm,
            response_mode,
            denylist,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
