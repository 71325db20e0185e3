//! Batch command implementation
//!
//! Input is either a JSON array of `{"text", "document_id"}` objects or one
//! such object per line. The batch summary is written as JSON.

use super::build_orchestrator;
use crate::cli::{exit_code, resolve_config};
use crate::domain::Document;
use crate::server::schemas::AnonymizeRequest;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON array or JSON-lines file of documents
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the summary here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the configured number of documents processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl BatchArgs {
    /// Execute the batch command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        let contents = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read batch input: {}", self.input.display()))?;
        let documents = parse_batch_input(&contents)?;

        let orchestrator = match build_orchestrator(&config) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(super::exit_code_for(&e));
            }
        };

        let concurrency = self
            .concurrency
            .unwrap_or(config.orchestration.batch_concurrency);
        let summary = orchestrator.anonymize_batch(documents, concurrency).await;

        let json = serde_json::to_string_pretty(&summary)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write summary: {}", path.display()))?;
                eprintln!("Summary written to {}", path.display());
            }
            None => println!("{json}"),
        }

        eprintln!(
            "Total: {} | Verified: {} | Unverified: {} | Failed: {}",
            summary.total, summary.successful, summary.unverified, summary.failed
        );

        Ok(if summary.failed > 0 {
            exit_code::PIPELINE_ERROR
        } else if summary.unverified > 0 {
            exit_code::UNVERIFIED
        } else {
            exit_code::SUCCESS
        })
    }
}

/// Parse a JSON array, or JSON lines, into documents
pub fn parse_batch_input(contents: &str) -> anyhow::Result<Vec<Document>> {
    let requests: Vec<AnonymizeRequest> = if contents.trim_start().starts_with('[') {
        serde_json::from_str(contents).context("Invalid JSON array of documents")?
    } else {
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid document on line {}", i + 1))
            })
            .collect::<anyhow::Result<_>>()?
    };

    Ok(requests
        .into_iter()
        .map(|r| Document::new(r.text).with_optional_id(r.document_id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let documents =
            parse_batch_input(r#"[{"text": "a", "document_id": "1"}, {"text": "b"}]"#).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id(), Some("1"));
        assert_eq!(documents[1].id(), None);
    }

    #[test]
    fn test_parse_json_lines() {
        let documents =
            parse_batch_input("{\"text\": \"a\"}\n\n{\"text\": \"b\", \"document_id\": \"x\"}\n")
                .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].content(), "b");
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let err = parse_batch_input("{\"text\": \"a\"}\nnot json").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
