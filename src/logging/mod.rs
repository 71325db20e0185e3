//! Logging and observability
//!
//! Structured logging via `tracing`:
//! - human-readable console output on stderr
//! - optional JSON file output with rotation
//! - `RUST_LOG` or the configured level as the filter
//!
//! Original personal data never reaches a log line. Pipeline code logs
//! counts, lengths, placeholders and hashes only.
//!
//! # Example
//!
//! ```no_run
//! use redactor::logging::init_logging;
//! use redactor::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document's pipeline run
///
/// # Example
///
/// ```no_run
/// use redactor::log_document_start;
///
/// log_document_start!(Some("doc-1"), 1200usize, 3u32);
/// ```
#[macro_export]
macro_rules! log_document_start {
    ($document_id:expr, $content_length:expr, $max_iterations:expr) => {
        tracing::info!(
            document_id = $document_id.unwrap_or("-"),
            content_length = $content_length,
            max_iterations = $max_iterations,
            "Starting anonymization"
        );
    };
}

/// Log the completion of a document's pipeline run
///
/// # Example
///
/// ```no_run
/// use redactor::log_document_complete;
/// use std::time::Duration;
///
/// log_document_complete!(Some("doc-1"), 2u32, true, Duration::from_millis(830));
/// ```
#[macro_export]
macro_rules! log_document_complete {
    ($document_id:expr, $iterations:expr, $success:expr, $duration:expr) => {
        tracing::info!(
            document_id = $document_id.unwrap_or("-"),
            iterations = $iterations,
            success = $success,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use redactor::log_error_with_context;
/// use redactor::domain::RedactorError;
///
/// let error = RedactorError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use redactor::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}
