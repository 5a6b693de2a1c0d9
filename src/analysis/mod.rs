//! The analysis domain: request and result types, the cache fingerprint,
//! the response validator and the cache-aside service that ties them together.

pub mod service;
pub mod validator;

pub use service::{AnalysisService, CacheStatus};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::{CACHE_KEY_PREFIX, MAX_PROMPT_CHARS};
use crate::error::AnalysisError;

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub prompt: String,
}

impl AnalysisRequest {
    /// Reject empty prompts and prompts longer than [`MAX_PROMPT_CHARS`]
    /// characters. Length is counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.prompt.is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        let chars = self.prompt.chars().count();
        if chars > MAX_PROMPT_CHARS {
            return Err(AnalysisError::InvalidRequest(format!(
                "prompt must be at most {MAX_PROMPT_CHARS} characters (got {chars})"
            )));
        }
        Ok(())
    }
}

/// One concrete improvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub issue: String,
    pub suggestion: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// A validated critique. `score` is always within 1..=10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub technique: String,
    pub strengths: Vec<String>,
    pub issues: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

/// `analysis:` followed by the lowercase hex SHA-256 of the prompt bytes.
pub fn cache_key(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    format!("{CACHE_KEY_PREFIX}{digest:x}")
}
