use serde::Deserialize;

/// The six domain fields of a fully specified product, as submitted. The
/// category reference arrives as a raw string and is only coerced to an
/// [`crate::domain::types::Identifier`] by the service layer.
///
/// Deserialized from a body that already passed the key-presence validator,
/// so a failure here means a present field carries the wrong type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category_id: String,
    pub price: f64,
    pub description: String,
    pub brand: String,
    pub stock: i32,
}

/// Partial form for product updates. Unknown keys in the body are silently
/// ignored by serde; only these six fields are honored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchForm {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub stock: Option<i32>,
}
