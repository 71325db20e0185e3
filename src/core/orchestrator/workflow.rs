//! Anonymization orchestrator - drives detection, verification and risk

use crate::adapters::llm::OracleProvider;
use crate::audit::AuditLogger;
use crate::config::RedactorConfig;
use crate::core::detection::EntityDetector;
use crate::core::risk::{create_risk_policy, RiskPolicy};
use crate::core::verification::Verifier;
use crate::domain::{AnonymizationResult, Document, RedactorError, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Default bound on detection/verification pairs per document
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Stages of a document's pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Detecting,
    Verifying,
    Retry,
    Assessing,
    Done,
}

impl WorkflowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detecting => "detecting",
            Self::Verifying => "verifying",
            Self::Retry => "retry",
            Self::Assessing => "assessing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs documents through the bounded detect/verify loop
pub struct AnonymizationOrchestrator {
    detector: EntityDetector,
    verifier: Verifier,
    risk_policy: Arc<dyn RiskPolicy>,
    max_iterations: u32,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationOrchestrator {
    /// Create an orchestrator
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::Configuration`] when `max_iterations` is 0.
    pub fn new(
        detector: EntityDetector,
        verifier: Verifier,
        risk_policy: Arc<dyn RiskPolicy>,
        max_iterations: u32,
    ) -> Result<Self> {
        if max_iterations == 0 {
            return Err(RedactorError::Configuration(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            detector,
            verifier,
            risk_policy,
            max_iterations,
            audit_logger: None,
        })
    }

    /// Build the full pipeline from configuration around a shared oracle
    ///
    /// The same oracle serves detection and verification. An audit logger is
    /// attached when `[audit] enabled = true`.
    pub fn from_config(config: &RedactorConfig, oracle: Arc<dyn OracleProvider>) -> Result<Self> {
        let risk_policy = create_risk_policy(&config.risk)?;

        let mut orchestrator = Self::new(
            EntityDetector::new(oracle.clone()),
            Verifier::new(oracle),
            risk_policy,
            config.orchestration.max_iterations,
        )?;

        if let Some(audit_logger) = AuditLogger::from_config(&config.audit)? {
            orchestrator = orchestrator.with_audit_logger(audit_logger);
        }

        Ok(orchestrator)
    }

    /// Record every completed document in an audit trail
    pub fn with_audit_logger(mut self, audit_logger: AuditLogger) -> Self {
        self.audit_logger = Some(audit_logger);
        self
    }

    /// Upper bound on detection/verification pairs
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Name of the configured risk policy
    pub fn risk_policy_name(&self) -> &str {
        self.risk_policy.name()
    }

    /// Anonymize one document
    ///
    /// Detection and verification repeat until verification passes or
    /// `max_iterations` pairs have run. Exhausting the loop is not an error:
    /// the last pair is returned with `success = false`. Risk is assessed
    /// exactly once, on the final text.
    ///
    /// # Errors
    ///
    /// - [`RedactorError::InvalidInput`] for an empty or whitespace-only document
    /// - any detection, verification, oracle or risk error, unchanged
    pub async fn anonymize_document(&self, document: &Document) -> Result<AnonymizationResult> {
        let span = tracing::info_span!("anonymize", run_id = %Uuid::new_v4());
        self.run(document).instrument(span).await
    }

    async fn run(&self, document: &Document) -> Result<AnonymizationResult> {
        if document.is_empty() {
            return Err(RedactorError::InvalidInput(
                "Cannot anonymize empty document".to_string(),
            ));
        }

        let start_time = Instant::now();
        let document_id = document.id();
        crate::log_document_start!(document_id, document.content().len(), self.max_iterations);

        let mut iteration = 0;
        let (anonymization, validation) = loop {
            iteration += 1;

            self.enter(WorkflowStage::Detecting, document_id, iteration);
            let anonymization = self.detector.detect(document.content()).await?;

            self.enter(WorkflowStage::Verifying, document_id, iteration);
            let validation = self.verifier.verify(&anonymization.anonymized_text).await?;

            if validation.passed || iteration >= self.max_iterations {
                break (anonymization, validation);
            }

            self.enter(WorkflowStage::Retry, document_id, iteration);
            tracing::info!(
                document_id = document_id.unwrap_or("-"),
                iteration,
                issues = validation.issue_count(),
                "Verification failed, retrying detection"
            );
        };

        if !validation.passed {
            tracing::warn!(
                document_id = document_id.unwrap_or("-"),
                iterations = iteration,
                issues = validation.issue_count(),
                "Iterations exhausted without passing verification"
            );
        }

        self.enter(WorkflowStage::Assessing, document_id, iteration);
        let risk_assessment = self
            .risk_policy
            .assess(&anonymization.anonymized_text, &anonymization.mappings)
            .await
            .map_err(|e| match e {
                RedactorError::RiskAssessment(_) => e,
                other => RedactorError::RiskAssessment(other.to_string()),
            })?;

        let success = validation.passed;
        let result = AnonymizationResult {
            document: document.clone(),
            anonymization,
            validation,
            risk_assessment,
            iterations: iteration,
            success,
        };

        self.enter(WorkflowStage::Done, document_id, iteration);
        let elapsed = start_time.elapsed();
        crate::log_document_complete!(document_id, iteration, success, elapsed);

        if let Some(audit_logger) = &self.audit_logger {
            if let Err(e) = audit_logger.log_result(&result, elapsed) {
                tracing::warn!(
                    document_id = document_id.unwrap_or("-"),
                    error = %e,
                    "Failed to write audit entry"
                );
            }
        }

        Ok(result)
    }

    fn enter(&self, stage: WorkflowStage, document_id: Option<&str>, iteration: u32) {
        tracing::debug!(
            document_id = document_id.unwrap_or("-"),
            iteration,
            stage = stage.as_str(),
            "Workflow stage"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::ScriptedOracle;
    use crate::core::risk::NegligibleRiskPolicy;
    use crate::domain::RiskLevel;

    const CLEAN: &str = r#"{"passed": true, "issues": [], "reasoning": "clean", "confidence": 0.9}"#;
    const DIRTY: &str = r#"{"passed": false, "issues": [{"type": "NAME", "value": "Jo"}], "confidence": 0.8}"#;

    fn orchestrator(oracle: &Arc<ScriptedOracle>, max_iterations: u32) -> AnonymizationOrchestrator {
        AnonymizationOrchestrator::new(
            EntityDetector::new(oracle.clone()),
            Verifier::new(oracle.clone()),
            Arc::new(NegligibleRiskPolicy),
            max_iterations,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let oracle = Arc::new(ScriptedOracle::empty());
        let result = AnonymizationOrchestrator::new(
            EntityDetector::new(oracle.clone()),
            Verifier::new(oracle),
            Arc::new(NegligibleRiskPolicy),
            0,
        );
        assert!(matches!(result, Err(RedactorError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_empty_document_rejected_without_oracle_calls() {
        let oracle = Arc::new(ScriptedOracle::empty());
        let err = orchestrator(&oracle, 3)
            .anonymize_document(&Document::new("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, RedactorError::InvalidInput(_)));
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_passes_first_iteration() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            r#"[{"type": "NAME", "value": "Jo"}]"#.to_string(),
            CLEAN.to_string(),
        ]));

        let result = orchestrator(&oracle, 3)
            .anonymize_document(&Document::new("Jo is here").with_id("d1"))
            .await
            .unwrap();

        assert_eq!(result.iterations, 1);
        assert!(result.success);
        assert_eq!(result.anonymized_text(), "[NAME_1] is here");
        assert_eq!(result.document_id(), Some("d1"));
        assert_eq!(result.risk_assessment.risk_level, RiskLevel::Negligible);
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_then_pass() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            "[]".to_string(),
            DIRTY.to_string(),
            r#"[{"type": "NAME", "value": "Jo"}]"#.to_string(),
            CLEAN.to_string(),
        ]));

        let result = orchestrator(&oracle, 3)
            .anonymize_document(&Document::new("Jo is here"))
            .await
            .unwrap();

        assert_eq!(result.iterations, 2);
        assert!(result.success);
        assert_eq!(oracle.call_count(), 4);
    }

    #[tokio::test]
    async fn test_single_iteration_bound() {
        let oracle = Arc::new(ScriptedOracle::new(vec!["[]".to_string(), DIRTY.to_string()]));

        let result = orchestrator(&oracle, 1)
            .anonymize_document(&Document::new("Jo is here"))
            .await
            .unwrap();

        assert_eq!(result.iterations, 1);
        assert!(!result.success);
        assert_eq!(result.anonymized_text(), "Jo is here");
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(WorkflowStage::Assessing.to_string(), "assessing");
        assert_eq!(WorkflowStage::Retry.as_str(), "retry");
    }
}
