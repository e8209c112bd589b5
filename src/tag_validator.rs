// Tag normalization
// Tags are the join key between content items and site sections.

use std::collections::HashSet;

use serde_json::Value;

pub fn is_valid_tag(tag_text: &str) -> bool {
    !tag_text.trim().is_empty()
}

/// Trim, drop empties and keep the first occurrence of each tag, in input order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if !is_valid_tag(trimmed) {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            normalized.push(trimmed.to_string());
        }
    }

    normalized
}

/// Same as [`normalize_tags`] for untyped form payloads.
///
/// Anything other than a JSON array yields an empty list; non-string
/// elements are skipped.
pub fn normalize_tags_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => normalize_tags(items.iter().filter_map(Value::as_str)),
        _ => Vec::new(),
    }
}
