//! Document model
//!
//! A [`Document`] is the unit of work submitted to the pipeline. It is
//! immutable once built: the builder methods consume and return `self`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text document to be anonymized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl Document {
    /// Create a document from raw text
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            document_id: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the document identifier
    pub fn with_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Set an optional identifier, leaving the document untouched on `None`
    pub fn with_optional_id(mut self, document_id: Option<String>) -> Self {
        self.document_id = document_id;
        self
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Identifier, if one was supplied
    pub fn id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Metadata entries
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Whether the content is empty or whitespace only
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Approximate word count
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("Contact John at john@email.com")
            .with_id("doc-1")
            .with_metadata("source", "email");

        assert_eq!(doc.content(), "Contact John at john@email.com");
        assert_eq!(doc.id(), Some("doc-1"));
        assert_eq!(doc.metadata().get("source").map(String::as_str), Some("email"));
        assert_eq!(doc.word_count(), 5);
    }

    #[test]
    fn test_whitespace_document_is_empty() {
        assert!(Document::new("").is_empty());
        assert!(Document::new("  \n\t ").is_empty());
        assert!(!Document::new(" a ").is_empty());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&Document::new("hi")).unwrap();
        assert_eq!(json, r#"{"content":"hi"}"#);
    }
}
