//! Deterministic in-process oracle
//!
//! [`ScriptedOracle`] replays queued responses and errors in order, then
//! falls back to an optional responder function. Every prompt it receives is
//! recorded so tests can assert on call counts and prompt content.

use super::provider::OracleProvider;
use crate::domain::OracleError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&str) -> Result<String, OracleError> + Send + Sync>;

/// Oracle that answers from a script
pub struct ScriptedOracle {
    queue: Mutex<VecDeque<Result<String, OracleError>>>,
    responder: Option<Responder>,
    prompts: Mutex<Vec<String>>,
    model: String,
}

impl ScriptedOracle {
    /// Oracle that returns `responses` in order
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            queue: Mutex::new(responses.into_iter().map(Ok).collect()),
            responder: None,
            prompts: Mutex::new(Vec::new()),
            model: "scripted".to_string(),
        }
    }

    /// Oracle with an empty script
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Oracle that computes each response from its prompt
    ///
    /// Queued entries still take precedence.
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, OracleError> + Send + Sync + 'static,
    {
        Self {
            responder: Some(Box::new(responder)),
            ..Self::empty()
        }
    }

    /// Append a response to the script
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock_queue().push_back(Ok(response.into()));
    }

    /// Append an error to the script
    pub fn push_error(&self, error: OracleError) {
        self.lock_queue().push_back(Err(error));
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `generate` calls made
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Entries still queued
    pub fn remaining(&self) -> usize {
        self.lock_queue().len()
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, OracleError>>> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl OracleProvider for ScriptedOracle {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        let next = self.lock_queue().pop_front();
        match next {
            Some(entry) => entry,
            None => match self.responder {
                Some(ref responder) => responder(prompt),
                None => Err(OracleError::InvalidResponse(
                    "scripted oracle has no response left".to_string(),
                )),
            },
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
