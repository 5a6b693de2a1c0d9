use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::cache::Cache;
use crate::consts::{CACHE_TTL, preview};
use crate::error::AnalysisError;
use crate::prompts::analysis::{build_analysis_system_prompt, build_user_message};
use crate::provider::Provider;

use super::validator::{extract_json, validate};
use super::{AnalysisResult, cache_key};

/// Cache reachability as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Connected,
    Disconnected,
}

/// Cache-aside proxy in front of the provider.
///
/// Both dependencies are optional: without a cache every call goes to the
/// provider, without a provider every call fails with
/// [`AnalysisError::NotConfigured`].
pub struct AnalysisService {
    provider: Option<Arc<dyn Provider>>,
    cache: Option<Arc<dyn Cache>>,
    cache_ttl: Duration,
    system_prompt: String,
}

impl AnalysisService {
    pub fn new(provider: Option<Arc<dyn Provider>>, cache: Option<Arc<dyn Cache>>) -> Self {
        Self {
            provider,
            cache,
            cache_ttl: CACHE_TTL,
            system_prompt: build_analysis_system_prompt(),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn provider_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// `Connected` only when a cache is attached and answers a ping right now.
    pub async fn cache_status(&self) -> CacheStatus {
        let Some(cache) = &self.cache else {
            return CacheStatus::Disconnected;
        };
        match cache.ping().await {
            Ok(()) => CacheStatus::Connected,
            Err(e) => {
                error!(cache = cache.name(), "cache health check failed: {e}");
                CacheStatus::Disconnected
            }
        }
    }

    /// Analyze a prompt the caller has already bounds-checked.
    ///
    /// Order within one call: cache read, provider call, cache write.
    pub async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, AnalysisError> {
        let Some(provider) = &self.provider else {
            error!("analysis requested but no provider is configured");
            return Err(AnalysisError::NotConfigured);
        };

        let key = cache_key(prompt);
        debug!(key = %key, "computed cache key");

        if let Some(cached) = self.read_cached(&key).await {
            info!("cache hit, returning cached analysis");
            return Ok(cached);
        }

        info!(provider = provider.name(), model = provider.model(), "calling provider");
        let completion = provider
            .complete(&self.system_prompt, &build_user_message(prompt))
            .await
            .inspect_err(|e| error!("provider call failed: {e}"))?;
        debug!(response = preview(&completion.text, 200), "provider response");

        let result = parse_completion(&completion.text)?;
        info!(
            score = result.score,
            technique = %result.technique,
            "analysis complete"
        );

        self.write_cached(&key, &result).await;
        Ok(result)
    }

    /// A hit that fails to parse or validate counts as a miss.
    async fn read_cached(&self, key: &str) -> Option<AnalysisResult> {
        let cache = self.cache.as_ref()?;
        let raw = match cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("cache miss");
                return None;
            }
            Err(e) => {
                warn!("cache read error: {e}");
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(AnalysisError::from)
            .and_then(|value| validate(&value).map_err(AnalysisError::from))
        {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(key, "ignoring unreadable cache entry: {e}");
                None
            }
        }
    }

    async fn write_cached(&self, key: &str, result: &AnalysisResult) {
        let Some(cache) = &self.cache else {
            return;
        };
        let json = match serde_json::to_string(result) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize analysis for cache: {e}");
                return;
            }
        };
        match cache.set(key, &json, self.cache_ttl).await {
            Ok(()) => debug!("cached analysis result"),
            Err(e) => warn!("cache write error: {e}"),
        }
    }
}

/// Extract, parse and validate the provider's raw text.
pub fn parse_completion(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let Some(candidate) = extract_json(text) else {
        error!("no JSON object found in provider response");
        return Err(AnalysisError::NoStructuredOutput);
    };

    let value: serde_json::Value = serde_json::from_str(candidate).inspect_err(|e| {
        error!(candidate = preview(candidate, 200), "JSON parsing failed: {e}");
    })?;

    let result = validate(&value).inspect_err(|e| error!("response validation failed: {e}"))?;
    Ok(result)
}
