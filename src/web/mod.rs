//! HTTP surface: `/health`, `/analyze` and `/examples`.

use axum::Router;
use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Build the application router with CORS and request tracing.
///
/// Browsers may call the API from `cors_origin` only. Methods and headers are
/// mirrored from the preflight because credentials are allowed, which rules
/// out wildcards.
pub fn create_app(state: Arc<AppState>, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let app = Router::new()
        .merge(routes::health_routes())
        .merge(routes::analysis_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    info!("web application created");
    app
}
