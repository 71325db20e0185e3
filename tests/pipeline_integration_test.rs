//! End-to-end pipeline tests against a scripted language model

use redactor::adapters::llm::ScriptedOracle;
use redactor::audit::AuditLogger;
use redactor::core::detection::{apply_replacements, build_mappings, EntityDetector};
use redactor::core::orchestrator::AnonymizationOrchestrator;
use redactor::core::risk::NegligibleRiskPolicy;
use redactor::core::verification::Verifier;
use redactor::domain::{
    Document, Entity, EntityType, OracleError, RedactorError, RiskLevel,
};
use std::sync::Arc;
use tempfile::tempdir;

const CLEAN_VERDICT: &str =
    r#"{"passed": true, "issues": [], "reasoning": "Only placeholders remain.", "confidence": 0.95}"#;

fn failing_verdict(value: &str) -> String {
    format!(
        r#"{{"passed": false, "issues": [{{"type": "NAME", "value": "{value}", "context": "x", "location": "line 1"}}], "reasoning": "missed one", "confidence": 0.9}}"#
    )
}

fn orchestrator(oracle: &Arc<ScriptedOracle>, max_iterations: u32) -> AnonymizationOrchestrator {
    AnonymizationOrchestrator::new(
        EntityDetector::new(oracle.clone()),
        Verifier::new(oracle.clone()),
        Arc::new(NegligibleRiskPolicy),
        max_iterations,
    )
    .expect("Failed to create orchestrator")
}

#[tokio::test]
async fn test_contact_line_passes_first_iteration() {
    let oracle = Arc::new(ScriptedOracle::new(vec![
        r#"[{"type": "NAME", "value": "John Smith"}, {"type": "EMAIL", "value": "john.smith@email.com"}]"#
            .to_string(),
        CLEAN_VERDICT.to_string(),
    ]));

    let result = orchestrator(&oracle, 3)
        .anonymize_document(&Document::new("Contact John Smith at john.smith@email.com"))
        .await
        .expect("Pipeline failed");

    assert_eq!(result.iterations, 1);
    assert!(result.success);
    assert!(result.validation.passed);

    let text = result.anonymized_text();
    assert_eq!(text, "Contact [NAME_1] at [EMAIL_1]");
    assert_eq!(text.matches("[NAME_1]").count(), 1);
    assert_eq!(text.matches("[EMAIL_1]").count(), 1);
    assert_eq!(result.anonymization.mappings.len(), 2);
    assert_eq!(result.risk_assessment.risk_level, RiskLevel::Negligible);
}

#[tokio::test]
async fn test_empty_input_detection_makes_no_calls() {
    let oracle = Arc::new(ScriptedOracle::empty());
    let detector = EntityDetector::new(oracle.clone());

    let mapping = detector.detect("").await.expect("Detection failed");

    assert_eq!(mapping.anonymized_text, "");
    assert_eq!(mapping.original_text, "");
    assert!(mapping.mappings.is_empty());
    assert!(mapping.entities.is_empty());
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_empty_document_is_an_input_error() {
    let oracle = Arc::new(ScriptedOracle::empty());

    let err = orchestrator(&oracle, 3)
        .anonymize_document(&Document::new(""))
        .await
        .unwrap_err();

    assert!(matches!(err, RedactorError::InvalidInput(_)));
    assert!(!err.is_retryable());
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_type_is_skipped_not_fatal() {
    let oracle = Arc::new(ScriptedOracle::new(vec![
        r#"[{"type":"NAME","value":"Jane"},{"type":"BOGUS","value":"x"}]"#.to_string(),
    ]));

    let mapping = EntityDetector::new(oracle)
        .detect("Jane wrote x")
        .await
        .expect("Detection failed");

    assert_eq!(mapping.entities.len(), 1);
    assert_eq!(mapping.entities[0].value, "Jane");
    assert_eq!(mapping.skipped_entities.len(), 1);
    assert_eq!(mapping.skipped_entities[0].index, 1);
    assert!(!mapping.skipped_entities[0].reason.is_empty());
    assert_eq!(mapping.anonymized_text, "[NAME_1] wrote x");
}

#[tokio::test]
async fn test_exhausted_iterations_return_last_attempt() {
    let oracle = Arc::new(ScriptedOracle::new(vec![
        "[]".to_string(),
        failing_verdict("Ana"),
        r#"[{"type": "NAME", "value": "Bo"}]"#.to_string(),
        failing_verdict("Ana"),
    ]));

    let result = orchestrator(&oracle, 2)
        .anonymize_document(&Document::new("Ana and Bo"))
        .await
        .expect("Pipeline failed");

    assert!(!result.success);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.anonymized_text(), "Ana and [NAME_1]");
    assert_eq!(result.validation.issues.len(), 1);
    assert_eq!(result.risk_assessment.overall_score, 5);
    assert_eq!(oracle.call_count(), 4);
}

#[tokio::test]
async fn test_iterations_never_exceed_bound() {
    for max_iterations in 1..=4u32 {
        let oracle = Arc::new(ScriptedOracle::from_fn(|prompt| {
            if prompt.contains("DIRECT-CHECK") {
                Ok(failing_verdict("Ana"))
            } else {
                Ok("[]".to_string())
            }
        }));

        let result = orchestrator(&oracle, max_iterations)
            .anonymize_document(&Document::new("Ana"))
            .await
            .expect("Pipeline failed");

        assert_eq!(result.iterations, max_iterations);
        assert_eq!(oracle.call_count(), 2 * max_iterations as usize);
    }
}

#[tokio::test]
async fn test_contradictory_verdict_is_reconciled() {
    let oracle = Arc::new(ScriptedOracle::new(vec![
        "[]".to_string(),
        r#"{"passed": true, "issues": [{"type": "EMAIL", "value": "a@b.io"}], "confidence": 1.5}"#
            .to_string(),
    ]));

    let result = orchestrator(&oracle, 1)
        .anonymize_document(&Document::new("write to a@b.io"))
        .await
        .expect("Pipeline failed");

    assert!(!result.validation.passed);
    assert!(!result.success);
    assert_eq!(result.validation.confidence, 1.0);
}

#[tokio::test]
async fn test_oracle_failure_mid_pipeline_propagates() {
    let oracle = Arc::new(ScriptedOracle::new(vec!["[]".to_string()]));
    oracle.push_error(OracleError::RateLimited("slow down".to_string()));

    let err = orchestrator(&oracle, 3)
        .anonymize_document(&Document::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, RedactorError::Oracle(OracleError::RateLimited(_))));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_detection_surfaces_excerpt() {
    let oracle = Arc::new(ScriptedOracle::new(vec![
        "I'd rather not.".to_string(),
        "Still no JSON here".to_string(),
    ]));

    let err = orchestrator(&oracle, 3)
        .anonymize_document(&Document::new("Ana"))
        .await
        .unwrap_err();

    assert!(err.is_malformed_response());
    assert!(err.to_string().contains("Still no JSON here"));
}

#[test]
fn test_longest_value_wins_over_substring() {
    let mappings = build_mappings(&[
        Entity::new(EntityType::Name, "John").unwrap(),
        Entity::new(EntityType::Name, "John Smith").unwrap(),
    ]);

    let result = apply_replacements("John Smith and John", &mappings).unwrap();

    assert_eq!(result, "[NAME_2] and [NAME_1]");
    assert!(!result.contains("[NAME_1] Smith"));
}

#[test]
fn test_same_value_under_two_types_maps_once() {
    let mappings = build_mappings(&[
        Entity::new(EntityType::Name, "Morgan").unwrap(),
        Entity::new(EntityType::Other, "Morgan").unwrap(),
    ]);

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings["Morgan"], "[NAME_1]");
}

#[test]
fn test_replacement_is_idempotent() {
    let text = "Dr. Lena Ortiz (lena@clinic.example, +1 555 0100) saw Lena.";
    let mappings = build_mappings(&[
        Entity::new(EntityType::Name, "Lena Ortiz").unwrap(),
        Entity::new(EntityType::Email, "lena@clinic.example").unwrap(),
        Entity::new(EntityType::Phone, "+1 555 0100").unwrap(),
        Entity::new(EntityType::Name, "Lena").unwrap(),
    ]);

    let once = apply_replacements(text, &mappings).unwrap();
    assert_eq!(once, "Dr. [NAME_1] ([EMAIL_1], [PHONE_1]) saw [NAME_2].");
    assert_eq!(apply_replacements(&once, &mappings).unwrap(), once);
}

#[test]
fn test_room_number_does_not_corrupt_placeholders() {
    let mappings = build_mappings(&[
        Entity::new(EntityType::Name, "Jane").unwrap(),
        Entity::new(EntityType::Other, "1").unwrap(),
    ]);

    let once = apply_replacements("Jane, room 1", &mappings).unwrap();
    assert_eq!(once, "[NAME_1], room [OTHER_1]");
    assert_eq!(apply_replacements(&once, &mappings).unwrap(), once);
}

#[tokio::test]
async fn test_audit_trail_holds_hashes_only() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("audit").join("redactor-audit.log");
    let audit_logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

    let oracle = Arc::new(ScriptedOracle::new(vec![
        r#"[{"type": "EMAIL", "value": "private@example.com"}]"#.to_string(),
        CLEAN_VERDICT.to_string(),
    ]));
    let orchestrator = orchestrator(&oracle, 3).with_audit_logger(audit_logger);

    orchestrator
        .anonymize_document(&Document::new("mail private@example.com").with_id("audit-1"))
        .await
        .expect("Pipeline failed");

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("audit-1"));
    assert!(content.contains("[EMAIL_1]"));
    assert!(!content.contains("private@example.com"));
}
