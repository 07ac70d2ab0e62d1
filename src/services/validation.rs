//! Key-presence validation for submitted records.

use serde_json::{Map, Value};

/// Checks `record` against a required-field set, reporting every missing
/// field at once in the order of `required`.
///
/// A field is missing iff its key is absent; explicit falsy values such as
/// `0`, `""` or `null` count as present. Callers that need a non-empty value
/// (the category name) check that separately.
pub fn validate_fields(record: &Map<String, Value>, required: &[&str]) -> Result<(), String> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|field| !record.contains_key(**field))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "The following fields are required: {}",
            missing.join(", ")
        ))
    }
}
