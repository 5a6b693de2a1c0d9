use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::consts::{DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_MODEL};

use super::{Completion, Provider, ProviderError, TokenUsage};

const MESSAGES_PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for [`AnthropicProvider`].
#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl AnthropicSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            max_tokens: MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Calls the Anthropic Messages API. The `reqwest::Client` is built once and
/// shared by every request.
pub struct AnthropicProvider {
    client: reqwest::Client,
    settings: AnthropicSettings,
}

impl AnthropicProvider {
    pub fn new(settings: AnthropicSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            MESSAGES_PATH
        )
    }

    fn build_request<'a>(&'a self, system: &'a str, user: &str) -> ApiRequest<'a> {
        ApiRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            system,
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ProviderError> {
        let body = self.build_request(system, user);

        let resp = self
            .client
            .post(self.endpoint())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .header("x-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, &text));
        }

        let api_resp: ApiResponse = resp.json().await.map_err(transport_error)?;

        let text = collect_text(&api_resp.content);
        if text.is_empty() {
            return Err(ProviderError::Other(
                "Anthropic API returned empty response".to_string(),
            ));
        }

        let usage = api_resp.usage.map(|u| TokenUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        });
        if let Some(usage) = usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total(),
                "Anthropic token usage"
            );
        }

        Ok(Completion { text, usage })
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

/// Use reqwest's own categories first, then fall back to the message text.
fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_connect() || err.is_timeout() {
        ProviderError::Network(err.to_string())
    } else if let Some(status) = err.status() {
        ProviderError::from_status(status.as_u16(), &err.to_string())
    } else {
        ProviderError::classify(err.to_string())
    }
}

/// Concatenate every `text` content block.
fn collect_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| {
            if block.content_type == "text" {
                block.text.as_deref()
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}
