// Redactor - LLM-assisted PII anonymization
// Copyright (c) 2025 Redactor Contributors
// Licensed under the MIT License

//! # Redactor - LLM-assisted PII anonymization
//!
//! Redactor removes personally identifiable information from free text. A
//! language model finds the personal data; Redactor turns its loosely
//! structured answers into a validated entity list, replaces every value
//! with a stable placeholder, asks the model again whether anything was
//! missed, and scores the residual risk.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - REST API
//! - [`core`] - Pipeline (normalize, detect, verify, assess, orchestrate)
//! - [`adapters`] - Language model providers
//! - [`domain`] - Domain types and errors
//! - [`config`] - Configuration management
//! - [`audit`] - Hashed audit trail
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redactor::adapters::llm::create_oracle;
//! use redactor::config::load_config;
//! use redactor::core::orchestrator::AnonymizationOrchestrator;
//! use redactor::domain::Document;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("redactor.toml")?;
//!     let oracle = create_oracle(&config.llm)?;
//!     let orchestrator = AnonymizationOrchestrator::from_config(&config, oracle)?;
//!
//!     let document = Document::new("Contact John Smith at john.smith@email.com");
//!     let result = orchestrator.anonymize_document(&document).await?;
//!
//!     // "Contact [NAME_1] at [EMAIL_1]"
//!     println!("{}", result.anonymized_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Placeholders
//!
//! Each unique value gets `[TYPE_N]`, numbered per type in the order the
//! model reported them. Longer values are replaced first, so `John Smith`
//! is never split by a separate `John` entry.
//!
//! ## Failure model
//!
//! - Malformed model output is repaired where possible and retried once
//! - Individual bad entities are skipped and reported, never fatal
//! - Transport failures from the model are returned as
//!   [`domain::RedactorError::Oracle`] without retrying
//! - A document that never passes verification is still returned, with
//!   `success = false`

pub mod adapters;
pub mod audit;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
