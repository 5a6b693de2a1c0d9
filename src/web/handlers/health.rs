use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::analysis::CacheStatus;
use crate::consts::VERSION;
use crate::web::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderStatus {
    #[serde(rename = "configured")]
    Configured,
    #[serde(rename = "not configured")]
    NotConfigured,
}

/// Body of `GET /health`. Each dependency is reported independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub redis: CacheStatus,
    pub claude: ProviderStatus,
    pub version: String,
}

/// Basic health check: GET /health
///
/// Always 200, even when the cache is down or no API key is set.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let claude = if state.service.provider_configured() {
        ProviderStatus::Configured
    } else {
        ProviderStatus::NotConfigured
    };

    let health = HealthStatus {
        status: "healthy".to_string(),
        redis: state.service.cache_status().await,
        claude,
        version: VERSION.to_string(),
    };
    debug!(?health, "health check");
    Json(health)
}
