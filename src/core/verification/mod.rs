//! Verification of redacted text
//!
//! A second oracle pass over the anonymized text looking for identifiers the
//! detector missed. The oracle's `passed` flag is never trusted on its own:
//! the issue list decides.

pub mod parse;
pub mod prompt;
pub mod verifier;

pub use parse::parse_verdict;
pub use prompt::verification_prompt;
pub use verifier::Verifier;
