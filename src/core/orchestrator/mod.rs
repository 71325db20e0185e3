//! Pipeline orchestration
//!
//! [`AnonymizationOrchestrator`] runs one document through
//! `DETECTING -> VERIFYING -> (RETRY -> DETECTING | ASSESSING) -> DONE` and
//! fans batches out over the same pipeline.
//!
//! # Example
//!
//! ```rust,no_run
//! use redactor::adapters::llm::create_oracle;
//! use redactor::config::load_config;
//! use redactor::core::orchestrator::AnonymizationOrchestrator;
//! use redactor::domain::Document;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("redactor.toml")?;
//! let oracle = create_oracle(&config.llm)?;
//! let orchestrator = AnonymizationOrchestrator::from_config(&config, oracle)?;
//!
//! let result = orchestrator
//!     .anonymize_document(&Document::new("Contact John Smith at john.smith@email.com"))
//!     .await?;
//! println!("{} (verified: {})", result.anonymized_text(), result.success);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod workflow;

pub use batch::{BatchSummary, DocumentOutcome};
pub use workflow::{AnonymizationOrchestrator, WorkflowStage, DEFAULT_MAX_ITERATIONS};
