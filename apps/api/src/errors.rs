use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::dispatch::envelope::ResponseEnvelope;
use crate::keys::KeyError;
use crate::llm_client::LlmError;
use crate::store::StoreError;

/// Application-level error type.
/// Every failure a request can hit ends up here and leaves as a `{"error": ...}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("AI generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

impl From<KeyError> for AppError {
    fn from(err: KeyError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::Validation(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Store(_) | AppError::Llm(_) | AppError::Internal(_) => 500,
        }
    }

    /// Converts the error into its response envelope, logging it at the level its
    /// status deserves.
    pub fn into_envelope(self) -> ResponseEnvelope {
        let status = self.status();
        match &self {
            AppError::Unauthorized(msg) => tracing::warn!("Auth error: {msg}"),
            AppError::Validation(msg) => tracing::warn!("Validation error: {msg}"),
            AppError::NotFound(msg) => tracing::info!("Not found: {msg}"),
            AppError::Store(e) => tracing::error!("Storage error: {e}"),
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        ResponseEnvelope::json(status, &json!({ "error": self.to_string() }))
    }
}
