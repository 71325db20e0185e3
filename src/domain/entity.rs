//! Personal data entity models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of personal data recognised by the detection prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Person names (first, last, full)
    Name,
    /// Email addresses
    Email,
    /// Phone numbers in any format
    Phone,
    /// Physical addresses
    Address,
    /// Any other identifier (IDs, account numbers, record numbers)
    #[serde(alias = "ID")]
    Other,
}

impl EntityType {
    /// All recognised types, in prompt order
    pub const ALL: [EntityType; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Other,
    ];

    /// Placeholder prefix, e.g. `NAME` in `[NAME_1]`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Address => "ADDRESS",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = String;

    /// Parse an oracle label. Matching is case-insensitive and `ID` is
    /// accepted as an alias of `OTHER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NAME" => Ok(Self::Name),
            "EMAIL" => Ok(Self::Email),
            "PHONE" => Ok(Self::Phone),
            "ADDRESS" => Ok(Self::Address),
            "OTHER" | "ID" => Ok(Self::Other),
            _ => Err(format!(
                "unknown entity type '{}'; expected one of NAME, EMAIL, PHONE, ADDRESS, OTHER",
                s
            )),
        }
    }
}

/// A detected span of personal data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Category claimed by the oracle
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Exact text to redact, trimmed
    pub value: String,
}

impl Entity {
    /// Create an entity, trimming the value
    ///
    /// # Errors
    ///
    /// Returns a rejection reason when the trimmed value is empty.
    pub fn new(entity_type: EntityType, value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("entity value is empty".to_string());
        }
        Ok(Self {
            entity_type,
            value: value.to_string(),
        })
    }
}

/// A raw oracle item rejected by per-item validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntity {
    /// Position of the item in the oracle's array
    pub index: usize,
    /// The item exactly as the oracle produced it
    pub raw: serde_json::Value,
    /// Why it was rejected
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_parsing() {
        assert_eq!("NAME".parse::<EntityType>().unwrap(), EntityType::Name);
        assert_eq!(" email ".parse::<EntityType>().unwrap(), EntityType::Email);
        assert_eq!("ID".parse::<EntityType>().unwrap(), EntityType::Other);
        assert!("BOGUS".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_entity_type_serde() {
        assert_eq!(serde_json::to_string(&EntityType::Address).unwrap(), "\"ADDRESS\"");
        let parsed: EntityType = serde_json::from_str("\"ID\"").unwrap();
        assert_eq!(parsed, EntityType::Other);
    }

    #[test]
    fn test_entity_value_is_trimmed() {
        let entity = Entity::new(EntityType::Name, "  Jane Doe ").unwrap();
        assert_eq!(entity.value, "Jane Doe");
    }

    #[test]
    fn test_blank_entity_rejected() {
        assert!(Entity::new(EntityType::Phone, "   ").is_err());
    }

    #[test]
    fn test_labels_match_display() {
        for entity_type in EntityType::ALL {
            assert_eq!(entity_type.to_string(), entity_type.label());
        }
    }
}
