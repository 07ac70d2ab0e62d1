use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductUpdate,
};
use crate::domain::types::{Identifier, IdentifierError};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub price: f64,
    pub description: String,
    pub brand: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`]. The id is minted before insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub price: f64,
    pub description: String,
    pub brand: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial change set for product updates. `None` fields are left untouched
/// by Diesel; `updated_at` is always written.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub stock: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = IdentifierError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Identifier::parse(product.id)?,
            name: product.name,
            category_id: Identifier::parse(product.category_id)?,
            price: product.price,
            description: product.description,
            brand: product.brand,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl NewProduct {
    /// Pairs the domain write model with a freshly minted identifier.
    pub fn from_domain(id: Identifier, product: &DomainNewProduct) -> Self {
        Self {
            id: id.into_inner(),
            name: product.name.clone(),
            category_id: product.category_id.as_str().to_string(),
            price: product.price,
            description: product.description.clone(),
            brand: product.brand.clone(),
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<ProductUpdate> for ProductChangeset {
    fn from(changes: ProductUpdate) -> Self {
        Self {
            name: changes.name,
            category_id: changes.category_id.map(Identifier::into_inner),
            price: changes.price,
            description: changes.description,
            brand: changes.brand,
            stock: changes.stock,
            updated_at: changes.updated_at,
        }
    }
}
