//! Re-identification risk assessment
//!
//! The orchestrator talks to a [`RiskPolicy`] only. [`NegligibleRiskPolicy`]
//! is the one policy shipped today; a scoring policy can replace it through
//! [`create_risk_policy`] without touching the pipeline.

use crate::config::RiskConfig;
use crate::domain::{RedactorError, Result, RiskAssessment, RiskLevel, MIN_RISK_SCORE};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Pluggable risk scoring step
#[async_trait]
pub trait RiskPolicy: Send + Sync {
    /// Policy name as used in configuration
    fn name(&self) -> &str;

    /// Score the final anonymized text
    ///
    /// `mappings` is the value-to-placeholder table that produced the text.
    async fn assess(
        &self,
        anonymized_text: &str,
        mappings: &BTreeMap<String, String>,
    ) -> Result<RiskAssessment>;
}

/// Fixed policy: every document is negligible risk
#[derive(Debug, Default, Clone, Copy)]
pub struct NegligibleRiskPolicy;

impl NegligibleRiskPolicy {
    pub const NAME: &'static str = "negligible";

    pub const REASONING: &'static str = "Fixed policy: every document is assessed as NEGLIGIBLE risk. \
        Multi-dimensional scoring is not implemented yet.";
}

#[async_trait]
impl RiskPolicy for NegligibleRiskPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn assess(
        &self,
        anonymized_text: &str,
        mappings: &BTreeMap<String, String>,
    ) -> Result<RiskAssessment> {
        tracing::debug!(
            policy = Self::NAME,
            text_length = anonymized_text.len(),
            replacements = mappings.len(),
            "Assessing risk"
        );

        RiskAssessment::new(
            MIN_RISK_SCORE,
            RiskLevel::Negligible,
            true,
            1.0,
            Self::REASONING,
        )
    }
}

/// Create the risk policy named in configuration
///
/// # Errors
///
/// Returns [`RedactorError::Configuration`] for an unknown policy name.
pub fn create_risk_policy(config: &RiskConfig) -> Result<Arc<dyn RiskPolicy>> {
    match config.policy.trim().to_lowercase().as_str() {
        NegligibleRiskPolicy::NAME => Ok(Arc::new(NegligibleRiskPolicy)),
        other => Err(RedactorError::Configuration(format!(
            "Unsupported risk policy: {other}"
        ))),
    }
}
