use serde::Deserialize;

/// Body of category create/rename requests. `name` stays optional so the
/// handler can answer with the domain's own `"name" is required` message
/// instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of a bulk category insert. Bulk inserts are unconditional, so a
/// missing name defaults to empty rather than rejecting the batch.
#[derive(Debug, Deserialize)]
pub struct BulkCategoryEntry {
    #[serde(default)]
    pub name: String,
}
