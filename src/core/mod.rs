//! Core pipeline for Redactor.
//!
//! # Modules
//!
//! - [`normalize`] - JSON extraction and repair for oracle output
//! - [`detection`] - Entity detection, placeholder mapping and replacement
//! - [`verification`] - Residual identifier check over redacted text
//! - [`risk`] - Pluggable risk assessment policies
//! - [`orchestrator`] - Bounded detect/verify loop and batch processing
//!
//! # Workflow
//!
//! 1. **Detect**: ask the oracle for entities, validate them item by item
//! 2. **Replace**: map each unique value to `[TYPE_N]`, longest value first
//! 3. **Verify**: ask the oracle for identifiers that survived
//! 4. **Retry**: repeat from 1 while verification fails, up to `max_iterations`
//! 5. **Assess**: score the final text once with the configured risk policy

pub mod detection;
pub mod normalize;
pub mod orchestrator;
pub mod risk;
pub mod verification;
