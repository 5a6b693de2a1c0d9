use crate::analysis::AnalysisService;

/// Shared across all handlers for the life of the process.
pub struct AppState {
    pub service: AnalysisService,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self { service }
    }
}
