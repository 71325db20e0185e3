//! Exponential backoff decorator for transient oracle failures
//!
//! The pipeline never retries transport errors itself. Callers that want
//! backoff wrap their provider in a [`RetryingOracle`].

use super::provider::OracleProvider;
use crate::config::RetryConfig;
use crate::domain::OracleError;
use crate::log_retry_attempt;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Retries transient failures of an inner provider
///
/// Only [`OracleError::is_transient`] errors are retried. Authentication and
/// client errors are returned on the first occurrence.
pub struct RetryingOracle {
    inner: Arc<dyn OracleProvider>,
    config: RetryConfig,
}

impl RetryingOracle {
    pub fn new(inner: Arc<dyn OracleProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Delay before retry number `retry` (1-based), capped at `max_delay_ms`
    pub fn backoff_delay(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1) as i32;
        let delay_ms =
            (self.config.initial_delay_ms as f64) * self.config.backoff_multiplier.powi(exponent);
        let delay_ms = (delay_ms as u64).min(self.config.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

#[async_trait]
impl OracleProvider for RetryingOracle {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let max_retries = self.config.max_retries;
        let mut retries = 0;

        loop {
            match self.inner.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && retries < max_retries => {
                    retries += 1;
                    let delay = self.backoff_delay(retries);
                    log_retry_attempt!(retries, max_retries, e.to_string().as_str());
                    tracing::debug!(delay_ms = delay.as_millis() as u64, "Backing off");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
