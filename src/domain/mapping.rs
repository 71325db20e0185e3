//! Anonymization mapping produced by one detection attempt

use super::entity::{Entity, EntityType, SkippedEntity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Value object describing every replacement made in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationMapping {
    /// Unmodified input text
    pub original_text: String,
    /// Text with every mapped value replaced by its placeholder
    pub anonymized_text: String,
    /// Original value -> placeholder, unique by value
    pub mappings: BTreeMap<String, String>,
    /// Validated entities in oracle order, duplicates included
    pub entities: Vec<Entity>,
    /// Oracle items rejected by per-item validation
    #[serde(default)]
    pub skipped_entities: Vec<SkippedEntity>,
}

impl AnonymizationMapping {
    /// Mapping for input that needs no processing: text unchanged, nothing mapped
    pub fn passthrough(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original_text: text.clone(),
            anonymized_text: text,
            mappings: BTreeMap::new(),
            entities: Vec::new(),
            skipped_entities: Vec::new(),
        }
    }

    /// Number of validated entities, duplicates included
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of unique replacements
    pub fn replacement_count(&self) -> usize {
        self.mappings.len()
    }

    /// Number of rejected oracle items
    pub fn skipped_count(&self) -> usize {
        self.skipped_entities.len()
    }

    /// Entity counts grouped by type
    pub fn counts_by_type(&self) -> HashMap<EntityType, usize> {
        let mut counts = HashMap::new();
        for entity in &self.entities {
            *counts.entry(entity.entity_type).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_mapping() {
        let mapping = AnonymizationMapping::passthrough("   ");
        assert_eq!(mapping.original_text, "   ");
        assert_eq!(mapping.anonymized_text, "   ");
        assert_eq!(mapping.replacement_count(), 0);
        assert_eq!(mapping.entity_count(), 0);
        assert_eq!(mapping.skipped_count(), 0);
    }

    #[test]
    fn test_counts_by_type() {
        let mut mapping = AnonymizationMapping::passthrough("x");
        mapping.entities = vec![
            Entity::new(EntityType::Name, "Jane").unwrap(),
            Entity::new(EntityType::Name, "John").unwrap(),
            Entity::new(EntityType::Email, "j@x.io").unwrap(),
        ];
        let counts = mapping.counts_by_type();
        assert_eq!(counts.get(&EntityType::Name), Some(&2));
        assert_eq!(counts.get(&EntityType::Email), Some(&1));
        assert_eq!(counts.get(&EntityType::Phone), None);
    }
}
