//! Route handlers

use super::error::ApiError;
use super::schemas::{
    AnonymizeRequest, AnonymizeResponse, BatchAnonymizeRequest, BatchAnonymizeResponse,
    HealthResponse, ReadyResponse,
};
use super::state::AppState;
use crate::core::orchestrator::DocumentOutcome;
use crate::domain::Document;
use axum::extract::State;
use axum::response::Json;

/// POST /api/v1/anonymize
///
/// Unparseable oracle output still answers 200 with `success = false` and
/// the diagnostic in `error`.
pub async fn anonymize(
    State(state): State<AppState>,
    Json(request): Json<AnonymizeRequest>,
) -> Result<Json<AnonymizeResponse>, ApiError> {
    let document = Document::new(request.text).with_optional_id(request.document_id);

    match state.orchestrator.anonymize_document(&document).await {
        Ok(result) => Ok(Json(AnonymizeResponse::from_result(
            result,
            &state.llm_provider,
            &state.llm_model,
        ))),
        Err(e) if e.is_malformed_response() => {
            tracing::warn!(
                document_id = document.id().unwrap_or("-"),
                error = %e,
                "Returning parse failure to client"
            );
            Ok(Json(AnonymizeResponse::failure(
                document.id().map(str::to_string),
                e.to_string(),
                &state.llm_provider,
                &state.llm_model,
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/v1/anonymize/batch
pub async fn anonymize_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchAnonymizeRequest>,
) -> Json<BatchAnonymizeResponse> {
    let documents = request
        .documents
        .into_iter()
        .map(|r| Document::new(r.text).with_optional_id(r.document_id))
        .collect();

    let summary = state
        .orchestrator
        .anonymize_batch(documents, state.batch_concurrency)
        .await;

    let results = summary
        .outcomes
        .into_iter()
        .map(|outcome| match outcome {
            DocumentOutcome::Completed(result) => {
                AnonymizeResponse::from_result(*result, &state.llm_provider, &state.llm_model)
            }
            DocumentOutcome::Failed {
                document_id, error, ..
            } => AnonymizeResponse::failure(document_id, error, &state.llm_provider, &state.llm_model),
        })
        .collect();

    Json(BatchAnonymizeResponse {
        results,
        total: summary.total,
        successful: summary.successful,
        unverified: summary.unverified,
        failed: summary.failed,
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_provider: state.llm_provider.clone(),
    })
}

/// GET /ready
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready".to_string(),
        llm_provider: state.llm_provider.clone(),
        llm_model: state.llm_model.clone(),
        max_iterations: state.orchestrator.max_iterations(),
        risk_policy: state.orchestrator.risk_policy_name().to_string(),
    })
}
