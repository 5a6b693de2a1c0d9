use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::info;

use crate::analysis::{AnalysisRequest, AnalysisResult};
use crate::consts::preview;
use crate::error::AnalysisError;
use crate::web::state::AppState;

/// Analyze a prompt: POST /analyze
///
/// Body-shape problems (missing field, bad JSON, empty or over-long prompt)
/// are rejected with 422 before the service runs.
pub async fn analyze_prompt(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AnalysisError> {
    let Json(request) =
        payload.map_err(|rejection| AnalysisError::InvalidRequest(rejection.body_text()))?;
    request.validate()?;

    info!(
        prompt = preview(&request.prompt, 50),
        length = request.prompt.chars().count(),
        "analyzing prompt"
    );

    let result = state.service.analyze(&request.prompt).await?;
    Ok(Json(result))
}
