//! Domain models and types for Redactor.
//!
//! Every value here is created fresh per request, carried through the
//! pipeline by value and never mutated after construction.
//!
//! # Overview
//!
//! - **Input** ([`Document`])
//! - **Detection output** ([`Entity`], [`SkippedEntity`], [`AnonymizationMapping`])
//! - **Verification output** ([`ValidationIssue`], [`ValidationResult`])
//! - **Risk output** ([`RiskAssessment`], [`RiskLevel`])
//! - **Pipeline output** ([`AnonymizationResult`])
//! - **Error types** ([`RedactorError`], [`OracleError`], [`DetectionError`], [`VerificationError`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RedactorError>`]:
//!
//! ```rust
//! use redactor::domain::{Document, RedactorError, Result};
//!
//! fn require_content(doc: &Document) -> Result<()> {
//!     if doc.is_empty() {
//!         return Err(RedactorError::InvalidInput("empty".into()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod entity;
pub mod errors;
pub mod mapping;
pub mod outcome;
pub mod result;
pub mod risk;
pub mod validation;

pub use document::Document;
pub use entity::{Entity, EntityType, SkippedEntity};
pub use errors::{
    DetectionError, OracleError, RedactorError, ResponseDiagnostics, VerificationError,
};
pub use mapping::AnonymizationMapping;
pub use outcome::AnonymizationResult;
pub use result::Result;
pub use risk::{RiskAssessment, RiskLevel, MAX_RISK_SCORE, MIN_RISK_SCORE};
pub use validation::{clamp_confidence, ValidationIssue, ValidationResult};
