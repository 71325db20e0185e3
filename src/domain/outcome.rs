//! Orchestrator output

use super::document::Document;
use super::mapping::AnonymizationMapping;
use super::risk::RiskAssessment;
use super::validation::ValidationResult;
use serde::{Deserialize, Serialize};

/// Aggregated result of one document's pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// The submitted document
    pub document: Document,
    /// Mapping from the last detection attempt
    pub anonymization: AnonymizationMapping,
    /// Verdict on `anonymization.anonymized_text`
    pub validation: ValidationResult,
    /// Risk verdict, computed once after the loop
    pub risk_assessment: RiskAssessment,
    /// Detection/verification pairs consumed, at least 1
    pub iterations: u32,
    /// Mirrors `validation.passed`
    pub success: bool,
}

impl AnonymizationResult {
    /// Anonymized text of the final attempt
    pub fn anonymized_text(&self) -> &str {
        &self.anonymization.anonymized_text
    }

    /// Document identifier, if any
    pub fn document_id(&self) -> Option<&str> {
        self.document.id()
    }
}
