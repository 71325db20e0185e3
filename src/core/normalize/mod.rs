//! Response normalization
//!
//! Language model output is free-form text that should contain one JSON
//! array or object somewhere inside it. [`Normalizer`] extracts that
//! structure and runs an ordered chain of [`RepairStrategy`] steps when it
//! does not parse as-is:
//!
//! 1. strip markdown code fences
//! 2. locate the first opening bracket and the last closing bracket
//! 3. treat the tail as a truncated fragment when no closing bracket follows
//! 4. return the fragment unchanged when it parses
//! 5. otherwise try each repair strategy in order, stopping at the first
//!    output that parses
//! 6. if every strategy fails, return the fragment anyway so the caller can
//!    report a detailed parse error
//!
//! # Example
//!
//! ```rust
//! use redactor::core::normalize::{normalize, JsonShape, RepairKind};
//!
//! let raw = "```json\n[{\"type\": \"NAME\", \"value\": \"Jane\"}, {\"type\": \"EMA";
//! let normalized = normalize(raw, JsonShape::Array).unwrap();
//! assert_eq!(normalized.repair, RepairKind::Truncation);
//! assert_eq!(normalized.json, r#"[{"type": "NAME", "value": "Jane"}]"#);
//! ```

pub mod repair;

pub use repair::{default_chain, QuoteEscapeRepair, RepairKind, RepairStrategy, TruncationRepair};

/// Expected top-level JSON structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    pub fn open(&self) -> char {
        match self {
            Self::Array => '[',
            Self::Object => '{',
        }
    }

    pub fn close(&self) -> char {
        match self {
            Self::Array => ']',
            Self::Object => '}',
        }
    }
}

/// Extracted JSON text and how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedJson {
    /// Text believed to be valid JSON (unless `repair` is `Unrepaired`)
    pub json: String,
    /// Which strategy, if any, produced `json`
    pub repair: RepairKind,
}

/// Extracts and repairs JSON embedded in model output
pub struct Normalizer {
    chain: Vec<Box<dyn RepairStrategy>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(default_chain())
    }
}

impl Normalizer {
    /// Create a normalizer with an explicit repair chain
    pub fn new(chain: Vec<Box<dyn RepairStrategy>>) -> Self {
        Self { chain }
    }

    /// Extract the expected structure from `response`
    ///
    /// Returns `None` only when no opening bracket exists.
    pub fn normalize(&self, response: &str, shape: JsonShape) -> Option<NormalizedJson> {
        let cleaned = strip_code_fences(response);
        let start = cleaned.find(shape.open())?;

        let tail = &cleaned[start..];
        let fragment = match cleaned.rfind(shape.close()) {
            Some(end) if end > start => &cleaned[start..=end],
            _ => tail,
        };

        if is_valid_json(fragment) {
            return Some(NormalizedJson {
                json: fragment.to_string(),
                repair: RepairKind::None,
            });
        }

        // A closing bracket from a nested element can cut the fragment short
        // of a truncation point, so the full tail is tried as well.
        let mut inputs = vec![fragment];
        if tail.len() != fragment.len() {
            inputs.push(tail);
        }

        for strategy in &self.chain {
            for input in &inputs {
                if let Some(candidate) = strategy.repair(input, shape) {
                    if is_valid_json(&candidate) {
                        tracing::debug!(
                            strategy = strategy.name(),
                            original_length = input.len(),
                            repaired_length = candidate.len(),
                            "Repaired malformed JSON fragment"
                        );
                        return Some(NormalizedJson {
                            json: candidate,
                            repair: strategy.kind(),
                        });
                    }
                }
            }
        }

        tracing::debug!(
            fragment_length = fragment.len(),
            "No repair strategy produced valid JSON"
        );
        Some(NormalizedJson {
            json: fragment.to_string(),
            repair: RepairKind::Unrepaired,
        })
    }
}

/// Normalize with the default repair chain
pub fn normalize(response: &str, shape: JsonShape) -> Option<NormalizedJson> {
    Normalizer::default().normalize(response, shape)
}

fn strip_code_fences(response: &str) -> String {
    response
        .replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
}

fn is_valid_json(s: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(s).is_ok()
}
