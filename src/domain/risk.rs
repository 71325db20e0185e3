//! Re-identification risk models

use super::errors::RedactorError;
use super::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest possible overall score (five dimensions scored 1 each)
pub const MIN_RISK_SCORE: u8 = 5;

/// Highest possible overall score (five dimensions scored 5 each)
pub const MAX_RISK_SCORE: u8 = 25;

/// Risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
    Negligible,
}

impl RiskLevel {
    /// Upper-case label used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Negligible => "NEGLIGIBLE",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the risk assessment step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Overall score in `[5, 25]`
    pub overall_score: u8,
    /// Risk category
    pub risk_level: RiskLevel,
    /// Safe to publish under GDPR
    pub gdpr_compliant: bool,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Human-readable explanation
    pub reasoning: String,
    /// When the assessment was made (UTC)
    pub assessment_date: DateTime<Utc>,
}

impl RiskAssessment {
    /// Create an assessment dated now
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::RiskAssessment`] when the score or confidence
    /// is out of range.
    pub fn new(
        overall_score: u8,
        risk_level: RiskLevel,
        gdpr_compliant: bool,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Result<Self> {
        if !(MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&overall_score) {
            return Err(RedactorError::RiskAssessment(format!(
                "overall_score must be between {MIN_RISK_SCORE} and {MAX_RISK_SCORE}, got {overall_score}"
            )));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(RedactorError::RiskAssessment(format!(
                "confidence must be between 0.0 and 1.0, got {confidence}"
            )));
        }

        Ok(Self {
            overall_score,
            risk_level,
            gdpr_compliant,
            confidence,
            reasoning: reasoning.into(),
            assessment_date: Utc::now(),
        })
    }

    /// Whether the document may be published
    pub fn is_safe_to_publish(&self) -> bool {
        self.gdpr_compliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_assessment() {
        let assessment = RiskAssessment::new(5, RiskLevel::Negligible, true, 1.0, "fine").unwrap();
        assert!(assessment.is_safe_to_publish());
        assert_eq!(assessment.risk_level.as_str(), "NEGLIGIBLE");
    }

    #[test]
    fn test_score_out_of_range() {
        assert!(matches!(
            RiskAssessment::new(4, RiskLevel::Low, true, 0.5, ""),
            Err(RedactorError::RiskAssessment(_))
        ));
        assert!(RiskAssessment::new(26, RiskLevel::Critical, false, 0.5, "").is_err());
    }

    #[test]
    fn test_confidence_out_of_range() {
        assert!(RiskAssessment::new(10, RiskLevel::Medium, false, 1.2, "").is_err());
    }

    #[test]
    fn test_risk_level_serialization() {
        let json = serde_json::to_string(&RiskLevel::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
