//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{exit_code, DEFAULT_CONFIG_PATH};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            eprintln!("Configuration file already exists: {}", self.output);
            eprintln!("Use --force to overwrite");
            return Ok(exit_code::CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            generate_config_with_examples()
        } else {
            generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Choose a provider in [llm] (ollama, anthropic, openai)");
                println!("  2. Put credentials in .env (ANTHROPIC_API_KEY or OPENAI_API_KEY)");
                println!("  3. Validate: redactor --config {} validate-config", self.output);
                println!("  4. Try it: echo 'Mail jane@example.com' | redactor anonymize");
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                eprintln!("Failed to write configuration file: {e}");
                Ok(exit_code::FATAL)
            }
        }
    }
}

/// Generate minimal configuration
fn generate_minimal_config() -> String {
    r#"# Redactor Configuration File

[application]
log_level = "info"

[llm]
provider = "ollama"
model = "gemma-custom"
base_url = "http://localhost:11434"
temperature = 0.1

[orchestration]
max_iterations = 3
"#
    .to_string()
}

/// Generate configuration with every option documented
fn generate_config_with_examples() -> String {
    r#"# Redactor Configuration File
#
# Values of the form ${VAR} are read from the environment (or .env).
# Any setting can be overridden with REDACTOR_<SECTION>_<KEY>,
# e.g. REDACTOR_LLM_PROVIDER=anthropic.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Language Model
# ============================================================================
[llm]
# Provider: ollama | anthropic (alias: claude) | openai
provider = "ollama"

# Model identifier. Defaults per provider when omitted.
model = "gemma-custom"

# Sampling temperature (0.0 - 1.0)
temperature = 0.1

# Maximum tokens per response
max_tokens = 4096

# Provider endpoint. Defaults per provider when omitted.
base_url = "http://localhost:11434"

# API key. Falls back to ANTHROPIC_API_KEY / OPENAI_API_KEY / OLLAMA_AUTH_TOKEN.
# api_key = "${ANTHROPIC_API_KEY}"

# Request timeout in seconds
timeout_seconds = 120

[llm.retry]
# Retries for transient transport failures (0 disables)
max_retries = 0
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Pipeline
# ============================================================================
[orchestration]
# Detection/verification rounds per document (1 - 10)
max_iterations = 3

# Documents processed at once in batch mode (1 - 64)
batch_concurrency = 4

[risk]
# Risk policy: negligible
policy = "negligible"

# ============================================================================
# REST Server
# ============================================================================
[server]
bind_address = "127.0.0.1:8000"

# ============================================================================
# Audit Trail (values are stored as SHA-256 hashes only)
# ============================================================================
[audit]
enabled = false
log_path = "./audit/redactor-audit.log"
json_format = true

# ============================================================================
# File Logging
# ============================================================================
[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
    .to_string()
}
