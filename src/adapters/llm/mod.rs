//! Language model adapters
//!
//! The pipeline depends only on the [`OracleProvider`] trait. Concrete
//! providers are selected from configuration by [`create_oracle`]:
//!
//! - [`OllamaProvider`] - local or remote Ollama (`/api/generate`)
//! - [`AnthropicProvider`] - Anthropic Messages API
//! - [`OpenAiProvider`] - OpenAI Chat Completions
//!
//! [`RetryingOracle`] adds optional exponential backoff for transient
//! failures, and [`ScriptedOracle`] is a deterministic stand-in for tests.

mod anthropic;
mod client;
mod ollama;
mod openai;
mod provider;
mod retry;
mod scripted;

pub use anthropic::AnthropicProvider;
pub use client::create_oracle;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::OracleProvider;
pub use retry::RetryingOracle;
pub use scripted::ScriptedOracle;
