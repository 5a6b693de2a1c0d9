pub mod anthropic;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Why a provider call failed. The first three variants drive the
/// user-facing message; everything else lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider rejected the credentials: {0}")]
    Credential(String),

    #[error("provider rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("network error talking to provider: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Best-effort classification from an error message alone. Used when the
    /// failure carries no status code or transport category.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if ["api_key", "api key", "x-api-key", "authentication"]
            .iter()
            .any(|m| lower.contains(m))
        {
            Self::Credential(message)
        } else if ["rate limit", "rate_limit", "too many requests"]
            .iter()
            .any(|m| lower.contains(m))
        {
            Self::RateLimited(message)
        } else if ["network", "connection"].iter().any(|m| lower.contains(m)) {
            Self::Network(message)
        } else {
            Self::Other(message)
        }
    }

    /// Map a non-success HTTP status from the provider.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = format!("provider returned HTTP {status}: {body}");
        match status {
            401 | 403 => Self::Credential(message),
            429 => Self::RateLimited(message),
            _ => Self::Other(message),
        }
    }
}

/// Token usage from a single LLM call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Total tokens (input + output).
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Raw text returned by the provider, plus token usage when reported.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

/// A remote text-generation API. One call, one answer, no retries.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ProviderError>;

    /// Provider name for logs, e.g. `"anthropic"`.
    fn name(&self) -> &str;

    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_credential_markers() {
        assert!(matches!(
            ProviderError::classify("invalid x-api-key"),
            ProviderError::Credential(_)
        ));
        assert!(matches!(
            ProviderError::classify("Authentication failed"),
            ProviderError::Credential(_)
        ));
        assert!(matches!(
            ProviderError::classify("missing api_key"),
            ProviderError::Credential(_)
        ));
    }

    #[test]
    fn classify_rate_limit_markers() {
        assert!(matches!(
            ProviderError::classify("Rate limit reached for requests"),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            ProviderError::classify("429 Too Many Requests"),
            ProviderError::RateLimited(_)
        ));
    }

    #[test]
    fn classify_network_markers() {
        assert!(matches!(
            ProviderError::classify("Connection reset by peer"),
            ProviderError::Network(_)
        ));
        assert!(matches!(
            ProviderError::classify("network unreachable"),
            ProviderError::Network(_)
        ));
    }

    #[test]
    fn classify_generic_falls_through() {
        assert_eq!(
            ProviderError::classify("something odd"),
            ProviderError::Other("something odd".to_string())
        );
    }

    #[test]
    fn classify_does_not_match_words_containing_rate() {
        // "generate" and "accurate" must not read as rate limiting
        assert!(matches!(
            ProviderError::classify("could not generate an accurate answer"),
            ProviderError::Other(_)
        ));
    }

    #[test]
    fn from_status_maps_auth_and_rate_limit() {
        assert!(matches!(
            ProviderError::from_status(401, "bad key"),
            ProviderError::Credential(_)
        ));
        assert!(matches!(
            ProviderError::from_status(403, "forbidden"),
            ProviderError::Credential(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "slow down"),
            ProviderError::RateLimited(_)
        ));
        let err = ProviderError::from_status(500, "boom");
        assert!(matches!(err, ProviderError::Other(_)));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 120,
            output_tokens: 80,
        };
        assert_eq!(usage.total(), 200);
    }
}
