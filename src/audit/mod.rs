//! Hashed audit trail
//!
//! One line per processed document. Redacted values are stored as SHA-256
//! hashes only, so the trail can prove what was replaced without holding
//! the personal data itself.

mod logger;

pub use logger::AuditLogger;
