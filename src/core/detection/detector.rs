//! Entity detector

use super::parse::parse_entities;
use super::prompt::detection_prompt;
use super::replace::{apply_replacements, build_mappings};
use crate::adapters::llm::OracleProvider;
use crate::domain::{AnonymizationMapping, DetectionError, ResponseDiagnostics, Result};
use std::sync::Arc;

/// Oracle calls allowed per `detect` before a parse failure is surfaced
pub const MAX_PARSE_ATTEMPTS: usize = 2;

/// Detects personal data through the oracle and redacts it
pub struct EntityDetector {
    oracle: Arc<dyn OracleProvider>,
}

impl EntityDetector {
    pub fn new(oracle: Arc<dyn OracleProvider>) -> Self {
        Self { oracle }
    }

    /// Detect entities in `text` and return the resulting mapping
    ///
    /// Blank text is returned unchanged without calling the oracle.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::RedactorError::Oracle`] as soon as the oracle call fails
    /// - [`crate::domain::RedactorError::Detection`] when no attempt yields a
    ///   parseable entity array
    pub async fn detect(&self, text: &str) -> Result<AnonymizationMapping> {
        if text.trim().is_empty() {
            return Ok(AnonymizationMapping::passthrough(text));
        }

        let prompt = detection_prompt(text);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let response = self.oracle.generate(&prompt).await?;

            match parse_entities(&response) {
                Ok(parsed) => {
                    let mappings = build_mappings(&parsed.entities);
                    let anonymized_text = apply_replacements(text, &mappings)?;

                    tracing::debug!(
                        attempt,
                        entities = parsed.entities.len(),
                        replacements = mappings.len(),
                        skipped = parsed.skipped.len(),
                        repair = parsed.repair.as_str(),
                        "Detection parsed"
                    );

                    return Ok(AnonymizationMapping {
                        original_text: text.to_string(),
                        anonymized_text,
                        mappings,
                        entities: parsed.entities,
                        skipped_entities: parsed.skipped,
                    });
                }
                Err(reason) if attempt < MAX_PARSE_ATTEMPTS => {
                    crate::log_retry_attempt!(attempt + 1, MAX_PARSE_ATTEMPTS, reason.as_str());
                }
                Err(reason) => {
                    let diagnostics = ResponseDiagnostics::new(attempt, &response, reason);
                    tracing::error!(
                        attempts = attempt,
                        response_length = diagnostics.response_length,
                        "Detection response could not be parsed"
                    );
                    return Err(DetectionError::MalformedResponse(diagnostics).into());
                }
            }
        }
    }
}
