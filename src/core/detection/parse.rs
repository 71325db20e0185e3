//! Oracle response parsing with per-item validation

use crate::core::normalize::{normalize, JsonShape, RepairKind};
use crate::domain::{Entity, EntityType, SkippedEntity};
use serde_json::Value;

/// Entities recovered from one oracle response
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntities {
    /// Items that passed validation, in oracle order
    pub entities: Vec<Entity>,
    /// Items that did not, with their index and reason
    pub skipped: Vec<SkippedEntity>,
    /// Repair applied by the normalizer
    pub repair: RepairKind,
}

/// Parse a detection response into validated entities
///
/// The response must contain a JSON array. Each element must be an object
/// with a recognised `type` string and a non-blank `value` string; elements
/// that fail are recorded as skipped and the rest are kept.
///
/// # Errors
///
/// Returns the failure reason when no array can be recovered from the
/// response. Individual bad elements never fail the call.
pub fn parse_entities(response: &str) -> Result<ParsedEntities, String> {
    let normalized = normalize(response, JsonShape::Array)
        .ok_or_else(|| "No JSON array found in response".to_string())?;

    let value: Value = serde_json::from_str(&normalized.json)
        .map_err(|e| format!("Invalid JSON ({} repair): {e}", normalized.repair.as_str()))?;

    let items = match value {
        Value::Array(items) => items,
        other => return Err(format!("Expected a JSON array, got {}", json_kind(&other))),
    };

    let mut entities = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match validate_item(&item) {
            Ok(entity) => entities.push(entity),
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "Skipping invalid entity");
                skipped.push(SkippedEntity {
                    index,
                    raw: item,
                    reason,
                });
            }
        }
    }

    Ok(ParsedEntities {
        entities,
        skipped,
        repair: normalized.repair,
    })
}

fn validate_item(item: &Value) -> Result<Entity, String> {
    let object = item
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_kind(item)))?;

    let entity_type: EntityType = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing or non-string 'type' field".to_string())?
        .parse()?;

    let value = object
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing or non-string 'value' field".to_string())?;

    Entity::new(entity_type, value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
