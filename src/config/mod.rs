//! Server configuration.
//!
//! Every setting is a command-line flag with an environment-variable
//! fallback. `main` loads `.env` through `dotenvy` before parsing, so values
//! from that file behave exactly like exported variables.

use clap::{Args, ValueEnum};
use std::time::Duration;
use tokio::net::TcpListener;

use anyhow::{Context, Result};

use crate::consts::{
    API_KEY_PLACEHOLDER, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_CORS_ORIGIN, DEFAULT_HOST,
    DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_REDIS_URL,
};

/// Where analyses are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackend {
    /// Redis at `--redis-url`; falls back to no cache if unreachable.
    Redis,
    /// In-process map, lost on restart.
    Memory,
    /// Always call the provider.
    None,
}

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Anthropic API key
    #[arg(long, env = "CLAUDE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Anthropic model used for analysis
    #[arg(long, env = "CLAUDE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Anthropic API root URL
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_ANTHROPIC_BASE_URL)]
    pub anthropic_base_url: String,

    /// Provider request timeout in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT", default_value_t = 120)]
    pub provider_timeout: u64,

    /// Cache backend
    #[arg(long, env = "CACHE_BACKEND", value_enum, default_value_t = CacheBackend::Redis)]
    pub cache: CacheBackend,

    /// Redis connection URL
    #[arg(long, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    pub redis_url: String,

    /// The single origin allowed to call the API from a browser
    #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Config {
    /// The API key, unless it is blank or still the `.env.example` placeholder.
    pub fn api_key(&self) -> Option<&str> {
        usable_api_key(self.api_key.as_deref())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }

    /// Open the listen socket. `host` may be an IP address or a hostname.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("failed to bind {}:{}", self.host, self.port))
    }
}

/// `None` for missing, blank or placeholder keys.
pub fn usable_api_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != API_KEY_PLACEHOLDER)
}
