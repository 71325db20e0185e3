//! Audit logger for anonymization runs

use crate::config::AuditConfig;
use crate::domain::{AnonymizationResult, RedactorError};
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    document_id: Option<String>,
    iterations: u32,
    success: bool,
    entity_counts: BTreeMap<String, usize>,
    skipped_count: usize,
    issue_count: usize,
    risk_level: String,
    processing_time_ms: u64,
    replacements: Vec<AuditReplacement>,
}

/// One mapping entry, with the original value hashed
#[derive(Debug, Serialize)]
struct AuditReplacement {
    placeholder: String,
    /// SHA-256 hash of original value (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for anonymization runs
///
/// Writes are serialized through an internal lock so concurrent batch
/// documents never interleave partial lines.
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the parent directory when enabled
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    /// Build from the `[audit]` section; `None` when auditing is disabled
    pub fn from_config(config: &AuditConfig) -> crate::domain::Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(PathBuf::from(&config.log_path), config.json_format, true)
            .map(Some)
            .map_err(|e| RedactorError::Audit(format!("{e:#}")))
    }

    /// Whether entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a completed document
    pub fn log_result(&self, result: &AnonymizationResult, elapsed: Duration) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entity_counts = result
            .anonymization
            .counts_by_type()
            .into_iter()
            .map(|(entity_type, count)| (entity_type.label().to_string(), count))
            .collect();

        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            document_id: result.document_id().map(str::to_string),
            iterations: result.iterations,
            success: result.success,
            entity_counts,
            skipped_count: result.anonymization.skipped_count(),
            issue_count: result.validation.issue_count(),
            risk_level: result.risk_assessment.risk_level.to_string(),
            processing_time_ms: elapsed.as_millis() as u64,
            replacements: result
                .anonymization
                .mappings
                .iter()
                .map(|(value, placeholder)| AuditReplacement {
                    placeholder: placeholder.clone(),
                    value_hash: hash_pii_value(value),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry).context("Failed to serialize audit entry")?
        } else {
            format!(
                "[{}] Document: {} | Iterations: {} | Success: {} | Replacements: {} | Skipped: {} | Risk: {} | Time: {}ms",
                entry.timestamp,
                entry.document_id.as_deref().unwrap_or("-"),
                entry.iterations,
                entry.success,
                entry.replacements.len(),
                entry.skipped_count,
                entry.risk_level,
                entry.processing_time_ms
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        writeln!(file, "{line}").context("Failed to write audit entry")?;
        Ok(())
    }
}

/// Hash a PII value using SHA-256
fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AnonymizationMapping, Document, Entity, EntityType, RiskAssessment, RiskLevel,
        ValidationResult,
    };
    use tempfile::tempdir;

    fn sample_result() -> AnonymizationResult {
        let mut anonymization = AnonymizationMapping::passthrough("Mail test@example.com");
        anonymization.anonymized_text = "Mail [EMAIL_1]".to_string();
        anonymization
            .mappings
            .insert("test@example.com".to_string(), "[EMAIL_1]".to_string());
        anonymization.entities = vec![Entity::new(EntityType::Email, "test@example.com").unwrap()];

        AnonymizationResult {
            document: Document::new("Mail test@example.com").with_id("doc-123"),
            anonymization,
            validation: ValidationResult::reconciled(true, vec![], "clean", 0.9),
            risk_assessment: RiskAssessment::new(5, RiskLevel::Negligible, true, 1.0, "stub")
                .unwrap(),
            iterations: 1,
            success: true,
        }
    }

    #[test]
    fn test_hash_pii_value() {
        let hash1 = hash_pii_value("test@example.com");
        let hash2 = hash_pii_value("test@example.com");
        let hash3 = hash_pii_value("different@example.com");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_log_result_json() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        logger
            .log_result(&sample_result(), Duration::from_millis(42))
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("doc-123"));
        assert!(content.contains("[EMAIL_1]"));
        assert!(content.contains(&hash_pii_value("test@example.com")));
        assert!(!content.contains("test@example.com"));

        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry["entity_counts"]["EMAIL"], 1);
        assert_eq!(entry["risk_level"], "NEGLIGIBLE");
    }

    #[test]
    fn test_plain_text_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        logger.log_result(&sample_result(), Duration::ZERO).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Document: doc-123 | Iterations: 1"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, false).unwrap();

        logger.log_result(&sample_result(), Duration::ZERO).unwrap();
        assert!(!log_path.exists());
        assert!(!logger.is_enabled());
    }

    #[test]
    fn test_from_config_disabled() {
        assert!(AuditLogger::from_config(&AuditConfig::default())
            .unwrap()
            .is_none());
    }
}
