use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::Identifier;

/// Canonical product record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Identifier,
    pub name: String,
    pub category_id: Identifier,
    pub price: f64,
    pub description: String,
    pub brand: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`]. Timestamps are stamped
/// by the caller; the identifier is minted by the repository at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category_id: Identifier,
    pub price: f64,
    pub description: String,
    pub brand: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial change set applied by product updates. Unset fields keep their
/// stored values; `updated_at` is always refreshed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category_id: Option<Identifier>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub stock: Option<i32>,
    pub updated_at: NaiveDateTime,
}

/// Read projection of a [`Product`]: the raw `category_id` is replaced with
/// the referenced category's name. Products whose category no longer exists
/// never appear in this form (inner-join semantics).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedProduct {
    pub id: Identifier,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub brand: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CategorizedProduct {
    /// Joins a product with the name of its category.
    pub fn project(product: Product, category: String) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category,
            price: product.price,
            description: product.description,
            brand: product.brand,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
