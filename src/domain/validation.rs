//! Verification verdict models

use serde::{Deserialize, Serialize};

/// A residual identifier found in anonymized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Kind of identifier (NAME, EMAIL, IP, ...)
    pub identifier_type: String,
    /// The identifier text as found
    pub value: String,
    /// Roughly 20 characters either side of the finding
    pub context: String,
    /// Human-readable location, e.g. "paragraph 2"
    pub location_hint: String,
}

/// Outcome of the verification pass
///
/// `passed == issues.is_empty()` always holds: the only constructors enforce
/// it, whatever the oracle claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no residual identifiers were found
    pub passed: bool,
    /// Residual identifiers, empty iff `passed`
    pub issues: Vec<ValidationIssue>,
    /// Explanation of the findings
    pub reasoning: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl ValidationResult {
    /// Build a verdict, trusting `issues` over the claimed flag and clamping
    /// `confidence` into `[0, 1]`.
    pub fn reconciled(
        claimed_passed: bool,
        issues: Vec<ValidationIssue>,
        reasoning: impl Into<String>,
        confidence: f64,
    ) -> Self {
        let passed = issues.is_empty();
        if passed != claimed_passed {
            tracing::debug!(
                claimed_passed,
                issue_count = issues.len(),
                "Reconciled contradictory verification verdict"
            );
        }

        Self {
            passed,
            issues,
            reasoning: reasoning.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    /// Verdict for text with nothing to check
    pub fn trivially_passing() -> Self {
        Self {
            passed: true,
            issues: Vec::new(),
            reasoning: "Empty document, nothing to validate".to_string(),
            confidence: 1.0,
        }
    }

    /// Number of residual identifiers
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Clamp a confidence value into `[0, 1]`; NaN becomes 0
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
