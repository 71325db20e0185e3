//! Anonymize command implementation
//!
//! Reads one document from a file or stdin and prints the redacted text, or
//! the full result as JSON.

use super::{build_orchestrator, exit_code_for};
use crate::cli::{exit_code, resolve_config};
use crate::domain::{AnonymizationResult, Document};
use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Read the document from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Identifier recorded with the result
    #[arg(long)]
    pub document_id: Option<String>,

    /// Override the configured iteration bound
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        if let Some(max_iterations) = self.max_iterations {
            tracing::info!(max_iterations, "Overriding max iterations from CLI");
            config.orchestration.max_iterations = max_iterations;
        }

        let text = self.read_input()?;
        let document = Document::new(text).with_optional_id(self.document_id.clone());

        let result = match build_orchestrator(&config) {
            Ok(orchestrator) => orchestrator.anonymize_document(&document).await,
            Err(e) => Err(e),
        };

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                crate::log_error_with_context!(&e, "Anonymization failed");
                eprintln!("Anonymization failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(&result);
        }

        Ok(if result.success {
            exit_code::SUCCESS
        } else {
            exit_code::UNVERIFIED
        })
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read document from stdin")?;
                Ok(text)
            }
        }
    }
}

fn print_result(result: &AnonymizationResult) {
    println!("{}", result.anonymized_text());

    eprintln!();
    eprintln!("Replacements: {}", result.anonymization.replacement_count());
    eprintln!("Skipped entities: {}", result.anonymization.skipped_count());
    eprintln!("Iterations: {}", result.iterations);
    eprintln!(
        "Verification: {}",
        if result.success { "passed" } else { "FAILED" }
    );
    for issue in &result.validation.issues {
        eprintln!("  - {} at {}", issue.identifier_type, issue.location_hint);
    }
    eprintln!("Risk: {}", result.risk_assessment.risk_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Ring Tomas on 555-0199").unwrap();

        let args = AnonymizeArgs {
            input: Some(file.path().to_path_buf()),
            document_id: None,
            max_iterations: None,
            json: false,
        };
        assert_eq!(args.read_input().unwrap(), "Ring Tomas on 555-0199");
    }

    #[test]
    fn test_read_input_missing_file() {
        let args = AnonymizeArgs {
            input: Some(PathBuf::from("no-such-input.txt")),
            document_id: None,
            max_iterations: None,
            json: true,
        };
        assert!(args.read_input().is_err());
    }
}
