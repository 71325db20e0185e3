//! Oracle port definition
//!
//! [`OracleProvider`] is the only call the pipeline makes across the system
//! boundary: given a prompt, return the model's text. Implementations differ
//! only in how they are constructed; none of them retries or caches.

use crate::domain::{OracleError, RedactorError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

/// Capability interface over a text-generation model
///
/// Calls are independent and carry no session state, so a single instance
/// can be shared across concurrent documents behind an `Arc`.
///
/// # Example
///
/// ```no_run
/// use redactor::adapters::llm::{OracleProvider, ScriptedOracle};
///
/// # async fn example() -> Result<(), redactor::domain::OracleError> {
/// let oracle = ScriptedOracle::new(vec!["[]".to_string()]);
/// let text = oracle.generate("Identify all personal data ...").await?;
/// assert_eq!(text, "[]");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait OracleProvider: Send + Sync {
    /// Generate a completion for `prompt`
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] for transport, authentication, timeout and
    /// provider-side failures. Never returns a partial response.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, OracleError>;

    /// Short provider identifier, e.g. `ollama`
    fn provider_name(&self) -> &str;

    /// Model identifier sent to the provider
    fn model_name(&self) -> &str;
}

/// Build the shared HTTP client for a provider
pub(crate) fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| RedactorError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Map a reqwest send failure onto the oracle error taxonomy
pub(crate) fn map_send_error(error: reqwest::Error) -> OracleError {
    if error.is_timeout() {
        OracleError::Timeout(error.to_string())
    } else {
        OracleError::ConnectionFailed(error.to_string())
    }
}

/// Pass successful responses through, map everything else by status
pub(crate) async fn check_status(
    response: Response,
) -> std::result::Result<Response, OracleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(OracleError::from_status(status.as_u16(), body))
}
