//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Redactor configuration file.

use crate::cli::{exit_code, resolve_config};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(config_path = config_path.unwrap_or("-"), "Validating configuration");

        // Loading also validates
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  LLM Provider: {}", config.llm.provider_kind());
        println!("  LLM Model: {}", config.llm.model_name());
        println!("  LLM Endpoint: {}", config.llm.endpoint());
        println!(
            "  API Key: {}",
            if config.llm.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Max Iterations: {}", config.orchestration.max_iterations);
        println!("  Batch Concurrency: {}", config.orchestration.batch_concurrency);
        println!("  Risk Policy: {}", config.risk.policy);
        println!("  Server Bind Address: {}", config.server.bind_address);
        println!(
            "  Audit: {}",
            if config.audit.enabled {
                config.audit.log_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(exit_code::SUCCESS)
    }
}
