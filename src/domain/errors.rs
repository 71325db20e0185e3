//! Domain error types
//!
//! This module defines the error hierarchy for Redactor. Errors are grouped by
//! the recovery decision a caller has to make:
//!
//! - input errors are never retried
//! - malformed oracle output is retried inside the pipeline, then surfaced with
//!   diagnostics ([`DetectionError`], [`VerificationError`])
//! - transport failures from the language model ([`OracleError`]) propagate
//!   untouched so callers can apply their own backoff
//! - risk assessment failures have their own kind
//!
//! No third-party error types leak through the public API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main Redactor error type
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied input that can never be processed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Language model transport errors
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Entity detection errors
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Verification errors
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),

    /// Unexpected failure inside the risk assessment step
    #[error("Risk assessment error: {0}")]
    RiskAssessment(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Audit trail errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl RedactorError {
    /// Whether a caller may reasonably retry the whole operation later.
    ///
    /// Only transient oracle failures qualify. Parse failures have already
    /// consumed the pipeline's own retry budget by the time they surface.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Oracle(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Stable short identifier for logs, CLI output and REST error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::InvalidInput(_) => "invalid_input",
            Self::Oracle(_) => "oracle",
            Self::Detection(_) => "detection",
            Self::Verification(_) => "verification",
            Self::RiskAssessment(_) => "risk_assessment",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
            Self::Audit(_) => "audit",
            Self::Other(_) => "other",
        }
    }

    /// Whether the error came from unparseable oracle output
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            Self::Detection(DetectionError::MalformedResponse(_))
                | Self::Verification(VerificationError::MalformedResponse(_))
        )
    }
}

/// Language model transport errors
///
/// Raised by [`crate::adapters::llm::OracleProvider`] implementations. These
/// errors don't expose the HTTP client's types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// Failed to reach the provider
    #[error("Failed to connect to LLM provider: {0}")]
    ConnectionFailed(String),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Provider throttled the request
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body did not have the provider's documented shape
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

impl OracleError {
    /// Whether the failure is likely to go away on its own
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout(_)
                | Self::RateLimited(_)
                | Self::ServerError { .. }
        )
    }

    /// Map an HTTP status and body to the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::AuthenticationFailed(format!("{status}: {message}")),
            408 => Self::Timeout(format!("{status}: {message}")),
            429 => Self::RateLimited(message),
            500..=599 => Self::ServerError { status, message },
            _ => Self::ClientError { status, message },
        }
    }
}

/// Diagnostic context attached to a response that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDiagnostics {
    /// Number of oracle calls made before giving up
    pub attempts: usize,
    /// Length in characters of the last response
    pub response_length: usize,
    /// Leading excerpt of the last response
    pub excerpt: String,
    /// Items dropped by per-item validation before the failure
    pub skipped_items: usize,
    /// Why the last attempt failed
    pub reason: String,
}

/// Maximum characters of an oracle response kept in diagnostics
pub const EXCERPT_LEN: usize = 200;

impl ResponseDiagnostics {
    /// Build diagnostics for the final failed attempt
    pub fn new(attempts: usize, response: &str, reason: impl Into<String>) -> Self {
        Self {
            attempts,
            response_length: response.chars().count(),
            excerpt: response.chars().take(EXCERPT_LEN).collect(),
            skipped_items: 0,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ResponseDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} after {} attempt(s) (response length {}, skipped items {}). Response excerpt: {}",
            self.reason, self.attempts, self.response_length, self.skipped_items, self.excerpt
        )
    }
}

/// Entity detection errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectionError {
    /// The oracle never produced a usable entity list
    #[error("Failed to parse LLM response as valid entities: {0}")]
    MalformedResponse(ResponseDiagnostics),
}

/// Verification errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The oracle never produced a usable verdict
    #[error("Failed to parse LLM verification response: {0}")]
    MalformedResponse(ResponseDiagnostics),
}

// Conversion from std::io::Error
impl From<std::io::Error> for RedactorError {
    fn from(err: std::io::Error) -> Self {
        RedactorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RedactorError {
    fn from(err: serde_json::Error) -> Self {
        RedactorError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RedactorError {
    fn from(err: toml::de::Error) -> Self {
        RedactorError::Configuration(format!("TOML parse error: {err}"))
    }
}
