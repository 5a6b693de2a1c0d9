use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use prompt_analyzer::analysis::AnalysisService;
use prompt_analyzer::banner::{BannerInfo, print_banner};
use prompt_analyzer::cache::redis::redact_url;
use prompt_analyzer::cache::{Cache, MemoryCache, RedisCache};
use prompt_analyzer::commands::{check_env, smoke};
use prompt_analyzer::config::{CacheBackend, Config};
use prompt_analyzer::consts::DEFAULT_CORS_ORIGIN;
use prompt_analyzer::logging;
use prompt_analyzer::provider::Provider;
use prompt_analyzer::provider::anthropic::{AnthropicProvider, AnthropicSettings};
use prompt_analyzer::shutdown::shutdown_signal;
use prompt_analyzer::web::{AppState, create_app};

#[derive(Parser)]
#[command(
    name = "prompt-analyzer",
    version,
    about = "Analyze and improve your prompts with AI."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    config: Config,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a .env file has everything the server needs
    CheckEnv {
        /// Path to the env file
        #[arg(default_value = ".env")]
        path: PathBuf,
    },
    /// Run end-to-end checks against a running server
    Smoke {
        /// Server base URL
        #[arg(long, default_value = "http://localhost:8000")]
        base_url: String,

        /// Origin to send on the CORS preflight
        #[arg(long, default_value = DEFAULT_CORS_ORIGIN)]
        origin: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before parsing so env fallbacks see values from .env
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        let ok = match command {
            Command::CheckEnv { path } => check_env::run(path)?,
            Command::Smoke { base_url, origin } => smoke::run(base_url, origin).await?,
        };
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    logging::init(logging::DEFAULT_FILTER);
    serve(cli.config).await
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("starting Prompt Analyzer backend");

    let cors_origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("invalid CORS origin {:?}", config.cors_origin))?;

    let provider = connect_provider(&config)?;
    let (cache, cache_label) = connect_cache(&config).await;

    let listener = config.bind().await?;
    let addr = listener.local_addr().context("failed to read listen address")?;

    print_banner(&BannerInfo {
        addr,
        model: &config.model,
        provider_status: if provider.is_some() {
            "configured"
        } else {
            "not configured"
        },
        cache: &cache_label,
        cors_origin: &config.cors_origin,
    });

    let service = AnalysisService::new(provider, cache);
    let app = create_app(Arc::new(AppState::new(service)), cors_origin);

    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

/// A missing key is not fatal; `/analyze` answers 503 until one is set.
fn connect_provider(config: &Config) -> anyhow::Result<Option<Arc<dyn Provider>>> {
    let Some(api_key) = config.api_key() else {
        error!("CLAUDE_API_KEY not properly set; /analyze will be unavailable");
        return Ok(None);
    };

    let settings = AnthropicSettings {
        model: config.model.clone(),
        base_url: config.anthropic_base_url.clone(),
        timeout: config.provider_timeout(),
        ..AnthropicSettings::new(api_key)
    };
    let provider: Arc<dyn Provider> = Arc::new(AnthropicProvider::new(settings)?);
    info!(model = %config.model, "Claude client initialized");
    Ok(Some(provider))
}

/// An unreachable cache is not fatal; the service runs uncached.
async fn connect_cache(config: &Config) -> (Option<Arc<dyn Cache>>, String) {
    match config.cache {
        CacheBackend::None => {
            info!("caching disabled");
            (None, "disabled".to_string())
        }
        CacheBackend::Memory => {
            info!("using in-process cache");
            let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
            (Some(cache), "memory".to_string())
        }
        CacheBackend::Redis => match RedisCache::connect(&config.redis_url).await {
            Ok(cache) => {
                info!(url = %redact_url(&config.redis_url), "connected to Redis");
                let cache: Arc<dyn Cache> = Arc::new(cache);
                (Some(cache), "redis (connected)".to_string())
            }
            Err(e) => {
                warn!("Redis connection failed: {e}");
                warn!("continuing without cache");
                (None, "redis (unavailable, running uncached)".to_string())
            }
        },
    }
}
