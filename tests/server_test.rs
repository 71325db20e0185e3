//! REST facade tests driven through the router without a socket

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use redactor::adapters::llm::ScriptedOracle;
use redactor::core::detection::EntityDetector;
use redactor::core::orchestrator::AnonymizationOrchestrator;
use redactor::core::risk::NegligibleRiskPolicy;
use redactor::core::verification::Verifier;
use redactor::domain::OracleError;
use redactor::server::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const CLEAN_VERDICT: &str =
    r#"{"passed": true, "issues": [], "reasoning": "clean", "confidence": 0.9}"#;

fn router(oracle: Arc<ScriptedOracle>) -> Router {
    let orchestrator = AnonymizationOrchestrator::new(
        EntityDetector::new(oracle.clone()),
        Verifier::new(oracle.clone()),
        Arc::new(NegligibleRiskPolicy),
        3,
    )
    .expect("Failed to create orchestrator");

    create_router(AppState::new(orchestrator, oracle.as_ref(), 2))
}

/// Answers detection prompts with one NAME entity and verification prompts
/// with a clean verdict
fn name_oracle(name: &'static str) -> Arc<ScriptedOracle> {
    Arc::new(ScriptedOracle::from_fn(move |prompt| {
        if prompt.contains("DIRECT-CHECK") {
            Ok(CLEAN_VERDICT.to_string())
        } else if prompt.contains(name) {
            Ok(format!(r#"[{{"type": "NAME", "value": "{name}"}}]"#))
        } else {
            Ok("[]".to_string())
        }
    }))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_anonymize_success() {
    let (status, body) = send(
        router(name_oracle("Alice Moreau")),
        post_json(
            "/api/v1/anonymize",
            json!({"text": "Alice Moreau signed the lease.", "document_id": "lease-7"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_id"], "lease-7");
    assert_eq!(body["anonymized_text"], "[NAME_1] signed the lease.");
    assert_eq!(body["mappings"]["Alice Moreau"], "[NAME_1]");
    assert_eq!(body["success"], true);
    assert_eq!(body["iterations"], 1);
    assert_eq!(body["llm_provider"], "scripted");
    assert_eq!(body["risk_assessment"]["risk_level"], "NEGLIGIBLE");
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_anonymize_unparseable_output_is_reported_not_raised() {
    let oracle = Arc::new(ScriptedOracle::from_fn(|_| {
        Ok("I am unable to help with that request.".to_string())
    }));

    let (status, body) = send(
        router(oracle.clone()),
        post_json("/api/v1/anonymize", json!({"text": "Call Bob on 555-0100"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["iterations"], 0);
    assert_eq!(body["anonymized_text"], "");
    assert_eq!(body["risk_assessment"]["risk_level"], "CRITICAL");
    assert_eq!(body["risk_assessment"]["overall_score"], 25);
    assert_eq!(body["risk_assessment"]["gdpr_compliant"], false);
    let error = body["error"].as_str().expect("error should be set");
    assert!(error.contains("No JSON array found"));
    assert_eq!(oracle.call_count(), 2);
}

#[tokio::test]
async fn test_anonymize_empty_text_is_unprocessable() {
    let oracle = Arc::new(ScriptedOracle::empty());

    let (status, body) = send(
        router(oracle.clone()),
        post_json("/api/v1/anonymize", json!({"text": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "invalid_input");
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_anonymize_unreachable_model_is_bad_gateway() {
    let oracle = Arc::new(ScriptedOracle::empty());
    oracle.push_error(OracleError::ConnectionFailed(
        "connection refused".to_string(),
    ));

    let (status, body) = send(
        router(oracle),
        post_json("/api/v1/anonymize", json!({"text": "Hello Carol"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "oracle");
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_batch_counts_and_order() {
    let (status, body) = send(
        router(name_oracle("Dana")),
        post_json(
            "/api/v1/anonymize/batch",
            json!({"documents": [
                {"text": "Dana called.", "document_id": "a"},
                {"text": "", "document_id": "b"},
                {"text": "Nothing personal here.", "document_id": "c"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["successful"], 2);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["unverified"], 0);

    let results = body["results"].as_array().expect("results array");
    let ids: Vec<_> = results
        .iter()
        .map(|r| r["document_id"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(results[0]["anonymized_text"], "[NAME_1] called.");
    assert_eq!(results[1]["success"], false);
    assert_eq!(results[2]["anonymized_text"], "Nothing personal here.");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(router(Arc::new(ScriptedOracle::empty())), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["llm_provider"], "scripted");
}

#[tokio::test]
async fn test_ready_reports_pipeline_settings() {
    let (status, body) = send(router(Arc::new(ScriptedOracle::empty())), get("/ready")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["llm_model"], "scripted");
    assert_eq!(body["max_iterations"], 3);
    assert_eq!(body["risk_policy"], "negligible");
}

#[tokio::test]
async fn test_serve_stops_on_shutdown_signal() {
    let oracle = Arc::new(ScriptedOracle::empty());
    let orchestrator = AnonymizationOrchestrator::new(
        EntityDetector::new(oracle.clone()),
        Verifier::new(oracle.clone()),
        Arc::new(NegligibleRiskPolicy),
        1,
    )
    .expect("Failed to create orchestrator");
    let state = AppState::new(orchestrator, oracle.as_ref(), 1);

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        redactor::server::serve(state, "127.0.0.1:0", async {}),
    )
    .await
    .expect("Server did not stop");

    assert!(result.is_ok());
}
