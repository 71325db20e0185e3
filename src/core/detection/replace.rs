//! Placeholder assignment and text replacement

use crate::domain::{Entity, EntityType, RedactorError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeMap, HashMap};

/// Assign a placeholder to every unique entity value
///
/// Entities are visited in order. A value that is already mapped is skipped,
/// so the first occurrence decides the type. Placeholders are numbered per
/// type over unique values: `[NAME_1]`, `[NAME_2]`, `[EMAIL_1]`.
pub fn build_mappings(entities: &[Entity]) -> BTreeMap<String, String> {
    let mut mappings = BTreeMap::new();
    let mut counters: HashMap<EntityType, usize> = HashMap::new();

    for entity in entities {
        if mappings.contains_key(&entity.value) {
            continue;
        }
        let counter = counters.entry(entity.entity_type).or_insert(0);
        *counter += 1;
        mappings.insert(
            entity.value.clone(),
            format!("[{}_{}]", entity.entity_type.label(), counter),
        );
    }

    mappings
}

/// Replace every occurrence of each mapped value with its placeholder
///
/// A single left-to-right scan over `text` picks the longest mapped value
/// starting at each position, so `John Smith` is never split by a separate
/// `John` entry. Placeholders already present in `text` match as themselves,
/// which keeps a second pass over the output from rewriting them. Matching
/// is literal.
///
/// # Errors
///
/// Returns [`RedactorError::Other`] when the matcher cannot be built for the
/// given values.
pub fn apply_replacements(text: &str, mappings: &BTreeMap<String, String>) -> Result<String> {
    let mut patterns: Vec<&str> = Vec::with_capacity(mappings.len() * 2);
    let mut replacements: Vec<&str> = Vec::with_capacity(mappings.len() * 2);

    for (value, placeholder) in mappings.iter().filter(|(value, _)| !value.is_empty()) {
        patterns.push(value);
        replacements.push(placeholder);
    }
    for placeholder in mappings.values() {
        if !mappings.contains_key(placeholder) {
            patterns.push(placeholder);
            replacements.push(placeholder);
        }
    }

    if patterns.is_empty() {
        return Ok(text.to_string());
    }

    let matcher = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&patterns)
        .map_err(|e| RedactorError::Other(format!("Failed to build replacement matcher: {e}")))?;

    Ok(matcher.replace_all(text, &replacements))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(entity_type: EntityType, value: &str) -> Entity {
        Entity::new(entity_type, value).unwrap()
    }

    #[test]
    fn test_per_type_numbering() {
        let mappings = build_mappings(&[
            entity(EntityType::Name, "Jane"),
            entity(EntityType::Email, "jane@x.io"),
            entity(EntityType::Name, "Omar"),
        ]);

        assert_eq!(mappings["Jane"], "[NAME_1]");
        assert_eq!(mappings["Omar"], "[NAME_2]");
        assert_eq!(mappings["jane@x.io"], "[EMAIL_1]");
    }

    #[test]
    fn test_duplicate_value_first_type_wins() {
        let mappings = build_mappings(&[
            entity(EntityType::Other, "4471"),
            entity(EntityType::Phone, "4471"),
            entity(EntityType::Phone, "555-0100"),
        ]);

        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings["4471"], "[OTHER_1]");
        assert_eq!(mappings["555-0100"], "[PHONE_1]");
    }

    #[test]
    fn test_longest_value_first() {
        let mappings = build_mappings(&[
            entity(EntityType::Name, "John"),
            entity(EntityType::Name, "John Smith"),
        ]);

        let result = apply_replacements("John Smith met John.", &mappings).unwrap();
        assert_eq!(result, "[NAME_2] met [NAME_1].");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let mappings = build_mappings(&[entity(EntityType::Email, "a@b.io")]);
        let result = apply_replacements("a@b.io, again a@b.io", &mappings).unwrap();
        assert_eq!(result, "[EMAIL_1], again [EMAIL_1]");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let mappings = build_mappings(&[entity(EntityType::Other, "ID.(42)*")]);
        assert_eq!(
            apply_replacements("ref ID.(42)* ID-42", &mappings).unwrap(),
            "ref [OTHER_1] ID-42"
        );
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mappings = build_mappings(&[
            entity(EntityType::Name, "Ann Lee"),
            entity(EntityType::Phone, "555 0100"),
        ]);
        let once = apply_replacements("Ann Lee: 555 0100", &mappings).unwrap();
        assert_eq!(apply_replacements(&once, &mappings).unwrap(), once);
    }

    #[test]
    fn test_placeholders_are_not_rescanned() {
        let mappings = build_mappings(&[
            entity(EntityType::Name, "Jane"),
            entity(EntityType::Other, "1"),
        ]);

        let result = apply_replacements("Jane, room 1", &mappings).unwrap();
        assert_eq!(result, "[NAME_1], room [OTHER_1]");
    }

    #[test]
    fn test_single_digit_value_second_pass() {
        let mappings = build_mappings(&[
            entity(EntityType::Name, "Jane"),
            entity(EntityType::Other, "1"),
        ]);

        let once = apply_replacements("Jane, room 1", &mappings).unwrap();
        assert_eq!(apply_replacements(&once, &mappings).unwrap(), once);
    }

    #[test]
    fn test_placeholder_fragment_values_are_idempotent() {
        let mappings = build_mappings(&[
            entity(EntityType::Name, "Jane"),
            entity(EntityType::Address, "2"),
            entity(EntityType::Other, "NAME"),
        ]);

        let once = apply_replacements("Jane lives at 2 NAME Street", &mappings).unwrap();
        assert_eq!(once, "[NAME_1] lives at [ADDRESS_1] [OTHER_1] Street");
        assert_eq!(apply_replacements(&once, &mappings).unwrap(), once);
    }

    #[test]
    fn test_empty_mappings_leave_text_unchanged() {
        let mappings = BTreeMap::new();
        assert_eq!(apply_replacements("nothing here", &mappings).unwrap(), "nothing here");
    }
}
