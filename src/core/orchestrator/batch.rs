//! Batch processing and reporting
//!
//! Documents in a batch are independent: each runs its own pipeline, a
//! failure is recorded against that document only, and outcomes come back in
//! input order.

use super::workflow::AnonymizationOrchestrator;
use crate::domain::{AnonymizationResult, Document};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Outcome of one document in a batch
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// The pipeline ran to completion (verified or not)
    Completed(Box<AnonymizationResult>),
    /// The pipeline raised a typed error
    Failed {
        document_id: Option<String>,
        kind: String,
        error: String,
    },
}

impl DocumentOutcome {
    /// Identifier of the document this outcome belongs to
    pub fn document_id(&self) -> Option<&str> {
        match self {
            Self::Completed(result) => result.document_id(),
            Self::Failed { document_id, .. } => document_id.as_deref(),
        }
    }

    /// Completed and verified
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Completed(result) if result.success)
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Per-document outcomes in input order
    pub outcomes: Vec<DocumentOutcome>,

    /// Number of documents submitted
    pub total: usize,

    /// Completed with verification passed
    pub successful: usize,

    /// Completed with verification still failing
    pub unverified: usize,

    /// Stopped by an error
    pub failed: usize,

    /// Wall-clock duration of the batch
    #[serde(skip)]
    pub duration: Duration,
}

impl BatchSummary {
    fn from_outcomes(outcomes: Vec<DocumentOutcome>, duration: Duration) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            successful: 0,
            unverified: 0,
            failed: 0,
            outcomes: Vec::new(),
            duration,
        };

        for outcome in &outcomes {
            match outcome {
                DocumentOutcome::Completed(result) if result.success => summary.successful += 1,
                DocumentOutcome::Completed(_) => summary.unverified += 1,
                DocumentOutcome::Failed { .. } => summary.failed += 1,
            }
        }

        summary.outcomes = outcomes;
        summary
    }

    /// Every document completed and verified
    pub fn is_successful(&self) -> bool {
        self.successful == self.total
    }

    /// Share of verified documents as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.successful as f64 / self.total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            successful = self.successful,
            unverified = self.unverified,
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Batch completed"
        );

        for outcome in &self.outcomes {
            if let DocumentOutcome::Failed {
                document_id,
                kind,
                error,
            } = outcome
            {
                tracing::warn!(
                    document_id = document_id.as_deref().unwrap_or("-"),
                    kind = %kind,
                    error = %error,
                    "Document failed"
                );
            }
        }
    }
}

impl AnonymizationOrchestrator {
    /// Anonymize many documents with at most `concurrency` in flight
    ///
    /// Never fails as a whole; per-document errors are captured in the
    /// returned summary. A `concurrency` of 0 is treated as 1.
    pub async fn anonymize_batch(&self, documents: Vec<Document>, concurrency: usize) -> BatchSummary {
        let start_time = Instant::now();
        tracing::info!(documents = documents.len(), concurrency, "Starting batch");

        let outcomes: Vec<DocumentOutcome> = stream::iter(documents)
            .map(|document| async move {
                match self.anonymize_document(&document).await {
                    Ok(result) => DocumentOutcome::Completed(Box::new(result)),
                    Err(e) => {
                        crate::log_error_with_context!(&e, "Batch document failed");
                        DocumentOutcome::Failed {
                            document_id: document.id().map(str::to_string),
                            kind: e.kind().to_string(),
                            error: e.to_string(),
                        }
                    }
                }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let summary = BatchSummary::from_outcomes(outcomes, start_time.elapsed());
        summary.log_summary();
        summary
    }
}
