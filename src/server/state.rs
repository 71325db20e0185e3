//! Shared application state

use crate::adapters::llm::OracleProvider;
use crate::core::orchestrator::AnonymizationOrchestrator;
use std::sync::Arc;

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnonymizationOrchestrator>,
    pub llm_provider: String,
    pub llm_model: String,
    pub batch_concurrency: usize,
}

impl AppState {
    /// Create state, taking provider and model identifiers from `oracle`
    pub fn new(
        orchestrator: AnonymizationOrchestrator,
        oracle: &dyn OracleProvider,
        batch_concurrency: usize,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            llm_provider: oracle.provider_name().to_string(),
            llm_model: oracle.model_name().to_string(),
            batch_concurrency,
        }
    }
}
