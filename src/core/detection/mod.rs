//! Entity detection
//!
//! Turns oracle output into a validated entity list, a deterministic
//! value-to-placeholder mapping and the redacted text.
//!
//! # Example
//!
//! ```rust
//! use redactor::adapters::llm::ScriptedOracle;
//! use redactor::core::detection::EntityDetector;
//! use std::sync::Arc;
//!
//! # async fn example() -> redactor::domain::Result<()> {
//! let oracle = Arc::new(ScriptedOracle::new(vec![
//!     r#"[{"type": "NAME", "value": "Jane Doe"}]"#.to_string(),
//! ]));
//! let detector = EntityDetector::new(oracle);
//!
//! let mapping = detector.detect("Jane Doe signed the form").await?;
//! assert_eq!(mapping.anonymized_text, "[NAME_1] signed the form");
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod parse;
pub mod prompt;
pub mod replace;

pub use detector::{EntityDetector, MAX_PARSE_ATTEMPTS};
pub use parse::{parse_entities, ParsedEntities};
pub use prompt::detection_prompt;
pub use replace::{apply_replacements, build_mappings};
