//! Detection prompt

/// Build the entity detection prompt for `text`
///
/// The prompt lists every category in [`crate::domain::EntityType`] with an
/// example and asks for a bare JSON array of `{"type", "value"}` objects.
pub fn detection_prompt(text: &str) -> String {
    format!(
        r#"Find every piece of personal data in the text below. Reply with a JSON array and nothing else.

Categories:
- NAME: names of people (first names, surnames, full names)
- EMAIL: email addresses
- PHONE: telephone numbers in any format
- ADDRESS: postal or street addresses
- OTHER: any other identifying value (patient or account numbers, policy numbers, record IDs, transaction references)

Each element must look like {{"type": "<CATEGORY>", "value": "<exact text>"}}. Copy values exactly as they appear in the text. Example:
[
  {{"type": "NAME", "value": "Maria Keller"}},
  {{"type": "EMAIL", "value": "m.keller@example.org"}},
  {{"type": "PHONE", "value": "+44 20 7946 0958"}},
  {{"type": "ADDRESS", "value": "14 Harbour Road"}},
  {{"type": "OTHER", "value": "ACC-88213"}}
]

If there is no personal data, reply with [].

Text:
{text}

JSON array:"#
    )
}
