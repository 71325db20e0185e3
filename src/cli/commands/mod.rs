//! CLI command implementations
//!
//! Every command returns the process exit code; see [`super::exit_code`].

pub mod anonymize;
pub mod batch;
pub mod init;
pub mod serve;
pub mod validate;

use crate::adapters::llm::create_oracle;
use crate::core::orchestrator::AnonymizationOrchestrator;
use crate::config::RedactorConfig;
use crate::domain::{RedactorError, Result};

/// Map a pipeline error to an exit code
pub(crate) fn exit_code_for(error: &RedactorError) -> i32 {
    match error {
        RedactorError::Configuration(_) => super::exit_code::CONFIG_ERROR,
        _ => super::exit_code::PIPELINE_ERROR,
    }
}

/// Build the oracle and orchestrator for a resolved configuration
pub(crate) fn build_orchestrator(config: &RedactorConfig) -> Result<AnonymizationOrchestrator> {
    let oracle = create_oracle(&config.llm)?;
    tracing::info!(
        provider = oracle.provider_name(),
        model = oracle.model_name(),
        "Language model configured"
    );
    AnonymizationOrchestrator::from_config(config, oracle)
}
