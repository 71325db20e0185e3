//! Verdict parsing

use crate::core::normalize::{normalize, JsonShape};
use crate::domain::{ValidationIssue, ValidationResult};
use serde_json::{Map, Value};

const DEFAULT_REASONING: &str = "No reasoning provided";
const DEFAULT_CONFIDENCE: f64 = 0.5;
const DEFAULT_ISSUE_TYPE: &str = "UNKNOWN";
const DEFAULT_LOCATION: &str = "unknown location";

/// Parse a verification response into a reconciled verdict
///
/// Missing fields take defaults: `passed` false, `issues` empty, a canned
/// reasoning and confidence 0.5. Non-object entries in `issues` are dropped.
/// The returned verdict always satisfies `passed == issues.is_empty()`.
///
/// # Errors
///
/// Returns the failure reason when no JSON object can be recovered or
/// `issues` is present but not an array.
pub fn parse_verdict(response: &str) -> Result<ValidationResult, String> {
    let normalized = normalize(response, JsonShape::Object)
        .ok_or_else(|| "No JSON object found in response".to_string())?;

    let value: Value = serde_json::from_str(&normalized.json)
        .map_err(|e| format!("Invalid JSON ({} repair): {e}", normalized.repair.as_str()))?;

    let object = value
        .as_object()
        .ok_or_else(|| "Expected a JSON object".to_string())?;

    let claimed_passed = object
        .get("passed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let issues = match object.get("issues") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => parse_issues(items),
        Some(_) => return Err("'issues' must be an array".to_string()),
    };

    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_REASONING);

    Ok(ValidationResult::reconciled(
        claimed_passed,
        issues,
        reasoning,
        parse_confidence(object.get("confidence")),
    ))
}

fn parse_issues(items: &[Value]) -> Vec<ValidationIssue> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_object() {
            Some(fields) => Some(parse_issue(fields)),
            None => {
                tracing::warn!(index, "Dropping verification issue that is not an object");
                None
            }
        })
        .collect()
}

fn parse_issue(fields: &Map<String, Value>) -> ValidationIssue {
    let text = |keys: &[&str], default: &str| {
        keys.iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .unwrap_or(default)
            .to_string()
    };

    ValidationIssue {
        identifier_type: text(&["type", "identifier_type"], DEFAULT_ISSUE_TYPE),
        value: text(&["value"], ""),
        context: text(&["context"], ""),
        location_hint: text(&["location", "location_hint"], DEFAULT_LOCATION),
    }
}

fn parse_confidence(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_CONFIDENCE),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_CONFIDENCE),
        _ => DEFAULT_CONFIDENCE,
    }
}
