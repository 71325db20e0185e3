//! Request and response bodies

use crate::domain::{
    AnonymizationResult, RiskAssessment, RiskLevel, SkippedEntity, ValidationResult,
    MAX_RISK_SCORE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `POST /api/v1/anonymize` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizeRequest {
    pub text: String,
    #[serde(default)]
    pub document_id: Option<String>,
}

/// `POST /api/v1/anonymize/batch` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnonymizeRequest {
    pub documents: Vec<AnonymizeRequest>,
}

/// Result for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizeResponse {
    pub document_id: Option<String>,
    pub anonymized_text: String,
    pub mappings: BTreeMap<String, String>,
    pub validation: ValidationResult,
    pub risk_assessment: RiskAssessment,
    pub iterations: u32,
    pub success: bool,
    pub llm_provider: String,
    pub llm_model: String,
    #[serde(default)]
    pub skipped_entities: Vec<SkippedEntity>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnonymizeResponse {
    /// Response for a completed pipeline run
    pub fn from_result(result: AnonymizationResult, llm_provider: &str, llm_model: &str) -> Self {
        Self {
            document_id: result.document.id().map(str::to_string),
            anonymized_text: result.anonymization.anonymized_text,
            mappings: result.anonymization.mappings,
            validation: result.validation,
            risk_assessment: result.risk_assessment,
            iterations: result.iterations,
            success: result.success,
            llm_provider: llm_provider.to_string(),
            llm_model: llm_model.to_string(),
            skipped_entities: result.anonymization.skipped_entities,
            error: None,
        }
    }

    /// Response for a document the pipeline could not finish
    ///
    /// Nothing is returned as anonymized and risk is reported at the maximum.
    pub fn failure(
        document_id: Option<String>,
        error: String,
        llm_provider: &str,
        llm_model: &str,
    ) -> Self {
        Self {
            document_id,
            anonymized_text: String::new(),
            mappings: BTreeMap::new(),
            validation: ValidationResult {
                passed: false,
                issues: Vec::new(),
                reasoning: format!("Processing error: {error}"),
                confidence: 0.0,
            },
            risk_assessment: RiskAssessment {
                overall_score: MAX_RISK_SCORE,
                risk_level: RiskLevel::Critical,
                gdpr_compliant: false,
                confidence: 0.0,
                reasoning: "Risk cannot be assessed because processing failed".to_string(),
                assessment_date: chrono::Utc::now(),
            },
            iterations: 0,
            success: false,
            llm_provider: llm_provider.to_string(),
            llm_model: llm_model.to_string(),
            skipped_entities: Vec::new(),
            error: Some(error),
        }
    }
}

/// Batch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnonymizeResponse {
    pub results: Vec<AnonymizeResponse>,
    pub total: usize,
    pub successful: usize,
    pub unverified: usize,
    pub failed: usize,
}

/// `GET /health` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub llm_provider: String,
}

/// `GET /ready` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub max_iterations: u32,
    pub risk_policy: String,
}

/// Error body for non-200 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
