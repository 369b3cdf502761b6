use axum::http::StatusCode;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Rendered through the active `ResponseFormatter`, so every error reaches
/// the caller in the same envelope as a success.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed inbound body. Never reaches the extractor.
    #[error("{0}")]
    BadRequest(String),

    /// Provider failure, propagated verbatim.
    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("Failed to save interview: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Llm(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
