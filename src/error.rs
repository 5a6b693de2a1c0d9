//! The single user-facing error type for `/analyze`.
//!
//! Cache failures never reach this type; they are logged and absorbed where
//! they happen.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::validator::ValidationError;
use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No usable provider credential.
    #[error("analysis provider is not configured")]
    NotConfigured,

    /// The request body is missing, malformed or out of bounds.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered without any `{ ... }` in it.
    #[error("Claude response did not contain valid JSON")]
    NoStructuredOutput,

    #[error("provider returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("provider response failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoStructuredOutput
            | Self::InvalidJson(_)
            | Self::Validation(_)
            | Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for the caller.
    pub fn detail(&self) -> String {
        match self {
            Self::NotConfigured => {
                "Analysis service not available. Please check API key configuration.".to_string()
            }
            Self::InvalidRequest(msg) => msg.clone(),
            Self::NoStructuredOutput => format!("Analysis failed: {self}"),
            Self::InvalidJson(_) => {
                "Failed to parse analysis response. The AI returned invalid JSON.".to_string()
            }
            Self::Validation(err) => format!("Analysis response format invalid: {err}"),
            Self::Provider(ProviderError::Credential(_)) => {
                "Invalid Claude API key. Please check your configuration.".to_string()
            }
            Self::Provider(ProviderError::RateLimited(_)) => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            Self::Provider(ProviderError::Network(_)) => {
                "Network error connecting to Claude API.".to_string()
            }
            Self::Provider(ProviderError::Other(msg)) => format!("Analysis failed: {msg}"),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}
