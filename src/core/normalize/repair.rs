//! Repair strategies for malformed JSON fragments
//!
//! Each strategy is a pure string transformation. A strategy returns `None`
//! when it does not apply; the caller decides whether the repaired text parses.

use super::JsonShape;

/// Which repair produced the returned JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairKind {
    /// Fragment parsed as extracted
    None,
    /// Trimmed to the last complete element and closed
    Truncation,
    /// Interior quotes inside string values escaped
    QuoteEscape,
    /// No strategy produced valid JSON; the raw fragment is returned
    Unrepaired,
}

impl RepairKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Truncation => "truncation",
            Self::QuoteEscape => "quote_escape",
            Self::Unrepaired => "unrepaired",
        }
    }
}

/// A single step of the repair chain
pub trait RepairStrategy: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Kind reported when this strategy's output parses
    fn kind(&self) -> RepairKind;

    /// Attempt a repair, returning `None` when the strategy does not apply
    fn repair(&self, fragment: &str, shape: JsonShape) -> Option<String>;
}

/// The default ordered chain: truncation first, then quote escaping
pub fn default_chain() -> Vec<Box<dyn RepairStrategy>> {
    vec![Box::new(TruncationRepair), Box::new(QuoteEscapeRepair)]
}

/// Closes a fragment that was cut off mid-structure
///
/// Trims back to the last `}` that ends a complete element (followed by `,`
/// or by nothing), then appends a closer for every bracket still open.
#[derive(Debug, Default, Clone, Copy)]
pub struct TruncationRepair;

impl RepairStrategy for TruncationRepair {
    fn name(&self) -> &'static str {
        "truncation"
    }

    fn kind(&self) -> RepairKind {
        RepairKind::Truncation
    }

    fn repair(&self, fragment: &str, shape: JsonShape) -> Option<String> {
        if fragment.trim_end().ends_with(shape.close()) {
            return None;
        }

        let tokens = structural_chars(fragment);
        let boundary = tokens
            .iter()
            .enumerate()
            .rev()
            .find(|(k, (_, c))| {
                *c == '}' && matches!(tokens.get(k + 1), None | Some((_, ',')))
            })
            .map(|(_, (idx, _))| *idx)?;

        let mut repaired = fragment[..=boundary].to_string();
        let mut open = Vec::new();
        for (_, c) in structural_chars(&repaired) {
            match c {
                '[' | '{' => open.push(c),
                ']' | '}' => {
                    open.pop();
                }
                _ => {}
            }
        }
        if open.is_empty() {
            return None;
        }

        for opener in open.iter().rev() {
            repaired.push(if *opener == '[' { ']' } else { '}' });
        }
        Some(repaired)
    }
}

/// Escapes stray `"` characters inside string values
///
/// A quote inside a value string is treated as its terminator only when the
/// next significant character is `}`, `]`, end of input, or a `,` that is
/// itself followed by the start of a key or element. Keys and bare tokens
/// (numbers, booleans, `null`) are copied unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteEscapeRepair;

impl RepairStrategy for QuoteEscapeRepair {
    fn name(&self) -> &'static str {
        "quote_escape"
    }

    fn kind(&self) -> RepairKind {
        RepairKind::QuoteEscape
    }

    fn repair(&self, fragment: &str, _shape: JsonShape) -> Option<String> {
        let chars: Vec<char> = fragment.chars().collect();
        let mut out = String::with_capacity(fragment.len() + 16);
        let mut containers: Vec<char> = Vec::new();
        let mut prev_significant: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '"' => {
                    let is_value = match prev_significant {
                        Some(':') | Some('[') => true,
                        Some(',') => containers.last() == Some(&'['),
                        _ => false,
                    };
                    out.push('"');
                    i += 1;
                    while i < chars.len() {
                        let sc = chars[i];
                        if sc == '\\' {
                            out.push(sc);
                            if let Some(next) = chars.get(i + 1) {
                                out.push(*next);
                            }
                            i += 2;
                            continue;
                        }
                        if sc == '"' {
                            if !is_value || terminates_value(&chars, i + 1) {
                                out.push('"');
                                i += 1;
                                break;
                            }
                            out.push_str("\\\"");
                            i += 1;
                            continue;
                        }
                        out.push(sc);
                        i += 1;
                    }
                    prev_significant = Some('"');
                }
                '{' | '[' => {
                    containers.push(c);
                    prev_significant = Some(c);
                    out.push(c);
                    i += 1;
                }
                '}' | ']' => {
                    containers.pop();
                    prev_significant = Some(c);
                    out.push(c);
                    i += 1;
                }
                _ => {
                    if !c.is_whitespace() {
                        prev_significant = Some(c);
                    }
                    out.push(c);
                    i += 1;
                }
            }
        }

        (out != fragment).then_some(out)
    }
}

fn next_significant(chars: &[char], from: usize) -> Option<(usize, char)> {
    chars
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, c)| (i, *c))
}

fn terminates_value(chars: &[char], from: usize) -> bool {
    match next_significant(chars, from) {
        None => true,
        Some((_, '}')) | Some((_, ']')) => true,
        Some((comma, ',')) => matches!(
            next_significant(chars, comma + 1),
            None | Some((_, '"')) | Some((_, '{')) | Some((_, '['))
        ),
        _ => false,
    }
}

/// Byte offsets of every non-whitespace character outside string literals.
/// Quote characters themselves are omitted.
fn structural_chars(s: &str) -> Vec<(usize, char)> {
    let mut out = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if !c.is_whitespace() {
            out.push((i, c));
        }
    }
    out
}
