use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::web::{handlers, state::AppState};

/// Liveness and dependency status. Never fails.
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(handlers::health::health_check))
}

pub fn analysis_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(handlers::analyze::analyze_prompt))
        .route("/examples", get(handlers::examples::list_examples))
}
