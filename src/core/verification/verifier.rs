//! Residual identifier verifier

use super::parse::parse_verdict;
use super::prompt::verification_prompt;
use crate::adapters::llm::OracleProvider;
use crate::core::detection::MAX_PARSE_ATTEMPTS;
use crate::domain::{ResponseDiagnostics, Result, ValidationResult, VerificationError};
use std::sync::Arc;

/// Asks the oracle whether any identifier survived redaction
pub struct Verifier {
    oracle: Arc<dyn OracleProvider>,
}

impl Verifier {
    pub fn new(oracle: Arc<dyn OracleProvider>) -> Self {
        Self { oracle }
    }

    /// Check anonymized text for residual identifiers
    ///
    /// Blank text passes trivially without calling the oracle. Parse failures
    /// get the same attempt budget as detection; oracle errors return at once.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::RedactorError::Oracle`] when the oracle call fails
    /// - [`crate::domain::RedactorError::Verification`] when no attempt yields
    ///   a parseable verdict
    pub async fn verify(&self, anonymized_text: &str) -> Result<ValidationResult> {
        if anonymized_text.trim().is_empty() {
            return Ok(ValidationResult::trivially_passing());
        }

        let prompt = verification_prompt(anonymized_text);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let response = self.oracle.generate(&prompt).await?;

            match parse_verdict(&response) {
                Ok(result) => {
                    tracing::debug!(
                        attempt,
                        passed = result.passed,
                        issues = result.issue_count(),
                        confidence = result.confidence,
                        "Verification parsed"
                    );
                    return Ok(result);
                }
                Err(reason) if attempt < MAX_PARSE_ATTEMPTS => {
                    crate::log_retry_attempt!(attempt + 1, MAX_PARSE_ATTEMPTS, reason.as_str());
                }
                Err(reason) => {
                    tracing::error!(
                        attempts = attempt,
                        response_length = response.len(),
                        "Verification response could not be parsed"
                    );
                    return Err(VerificationError::MalformedResponse(ResponseDiagnostics::new(
                        attempt, &response, reason,
                    ))
                    .into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::ScriptedOracle;
    use crate::domain::{OracleError, RedactorError};

    #[tokio::test]
    async fn test_verify_passes() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            r#"{"passed": true, "issues": [], "reasoning": "clean", "confidence": 0.9}"#.to_string(),
        ]));
        let verifier = Verifier::new(oracle.clone());

        let result = verifier.verify("[NAME_1] wrote back").await.unwrap();
        assert!(result.passed);
        assert!(oracle.prompts()[0].contains("[NAME_1] wrote back"));
    }

    #[tokio::test]
    async fn test_blank_text_passes_without_oracle() {
        let oracle = Arc::new(ScriptedOracle::empty());
        let result = Verifier::new(oracle.clone()).verify(" \t").await.unwrap();

        assert!(result.passed);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_retry_then_success() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            r#"{"passed": false, "issues": "oops"}"#.to_string(),
            r#"```json
{"passed": false, "issues": [{"type": "PHONE", "value": "555-0100"}], "confidence": 0.8}
```"#
                .to_string(),
        ]));

        let result = Verifier::new(oracle.clone()).verify("call 555-0100").await.unwrap();
        assert!(!result.passed);
        assert_eq!(result.issues[0].identifier_type, "PHONE");
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_attempts() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            "no".to_string(),
            "still no".to_string(),
        ]));

        let err = Verifier::new(oracle).verify("text").await.unwrap_err();
        assert!(matches!(
            err,
            RedactorError::Verification(VerificationError::MalformedResponse(ref d)) if d.attempts == 2
        ));
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let oracle = Arc::new(ScriptedOracle::empty());
        oracle.push_error(OracleError::AuthenticationFailed("401: bad key".to_string()));

        let err = Verifier::new(oracle.clone()).verify("text").await.unwrap_err();
        assert!(matches!(err, RedactorError::Oracle(OracleError::AuthenticationFailed(_))));
        assert_eq!(oracle.call_count(), 1);
    }
}
