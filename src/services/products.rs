//! Business rules for the product resource.
//!
//! The single-create path checks in a fixed order: duplicate name first,
//! then category existence, then field presence. The ordering is observable:
//! a duplicate name wins even when other fields are missing, and an absent or
//! unresolvable `categoryId` answers "Category not found" rather than
//! appearing in the missing-field list.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::domain::product::{CategorizedProduct, NewProduct, Product, ProductUpdate};
use crate::domain::types::Identifier;
use crate::forms::products::{ProductForm, ProductPatchForm};
use crate::repository::{CategoryReader, ProductReader, ProductWriter, RepositoryError};
use crate::services::categories::CATEGORY_NOT_FOUND;
use crate::services::validation::validate_fields;

use super::{ServiceError, ServiceResult};

pub(crate) const PRODUCT_NOT_FOUND: &str = "Product not found";
pub(crate) const PRODUCT_EXISTS: &str = "Product already exists";
pub(crate) const NO_PRODUCTS_FOR_CATEGORY: &str = "No products found for the given category";

/// Required fields of a product submission, in reporting order.
pub const PRODUCT_REQUIRED_FIELDS: [&str; 6] =
    ["name", "categoryId", "price", "description", "brand", "stock"];

/// Treats any non-object body as an empty record so every field reads as
/// missing instead of failing deserialization outright.
fn as_record(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<CategorizedProduct>>
where
    R: ProductReader,
{
    match repo.list_products() {
        Ok(products) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_product<R>(raw_id: &str, repo: &R) -> ServiceResult<CategorizedProduct>
where
    R: ProductReader,
{
    let id = Identifier::parse(raw_id).map_err(|_| ServiceError::InvalidId)?;

    match repo.get_product_by_id(&id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_product<R>(body: Value, repo: &R) -> ServiceResult<Product>
where
    R: CategoryReader + ProductReader + ProductWriter,
{
    let record = as_record(body);

    // 1. Duplicate name wins over everything else, even missing fields.
    if let Some(name) = record.get("name").and_then(Value::as_str) {
        match repo.find_product_by_name(name) {
            Ok(Some(_)) => return Err(ServiceError::Conflict(PRODUCT_EXISTS)),
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to look up product by name: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    // 2. The category reference must resolve. An absent or malformed
    //    `categoryId` cannot resolve, so it reads as "Category not found"
    //    and takes precedence over the missing-field report for that field.
    let category_id = record
        .get("categoryId")
        .and_then(Value::as_str)
        .and_then(|raw| Identifier::parse(raw).ok());
    let category_id = match category_id {
        Some(id) => match repo.get_category_by_id(&id) {
            Ok(Some(_)) => id,
            Ok(None) => return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
            Err(e) => {
                log::error!("Failed to get category: {e}");
                return Err(ServiceError::Internal);
            }
        },
        None => return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
    };

    // 3. All six fields must be present; report every missing one at once.
    if let Err(message) = validate_fields(&record, &PRODUCT_REQUIRED_FIELDS) {
        return Err(ServiceError::Validation(message));
    }

    // Unknown keys are stripped here; a present field of the wrong type is a
    // validation failure.
    let form: ProductForm = serde_json::from_value(Value::Object(record))
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let product = NewProduct {
        name: form.name,
        category_id,
        price: form.price,
        description: form.description,
        brand: form.brand,
        stock: form.stock,
        created_at: now,
        updated_at: now,
    };

    match repo.create_product(&product) {
        // The create response stays unprojected: no category name attached.
        Ok(product) => Ok(product),
        Err(RepositoryError::Duplicate) => Err(ServiceError::Conflict(PRODUCT_EXISTS)),
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_product<R>(raw_id: &str, body: Value, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    let id = Identifier::parse(raw_id).map_err(|_| ServiceError::InvalidId)?;

    let record = as_record(body);
    let patch: ProductPatchForm = serde_json::from_value(Value::Object(record))
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let category_id = match patch.category_id {
        Some(raw) => Some(Identifier::parse(raw).map_err(|_| ServiceError::InvalidId)?),
        None => None,
    };

    let changes = ProductUpdate {
        name: patch.name,
        category_id,
        price: patch.price,
        description: patch.description,
        brand: patch.brand,
        stock: patch.stock,
        updated_at: Utc::now().naive_utc(),
    };

    match repo.update_product(&id, &changes) {
        Ok(0) => Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Ok(_) => Ok(()),
        Err(RepositoryError::Duplicate) => Err(ServiceError::Conflict(PRODUCT_EXISTS)),
        Err(e) => {
            log::error!("Failed to update product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_product<R>(raw_id: &str, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    let id = Identifier::parse(raw_id).map_err(|_| ServiceError::InvalidId)?;

    match repo.delete_product(&id) {
        Ok(0) => Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Lists the products of one category. Zero rows answers "No products found
/// for the given category" whether or not the category itself exists; the
/// two cases are deliberately not distinguished.
pub fn list_products_by_category<R>(
    raw_id: &str,
    repo: &R,
) -> ServiceResult<Vec<CategorizedProduct>>
where
    R: ProductReader,
{
    let id = Identifier::parse(raw_id).map_err(|_| ServiceError::InvalidId)?;

    match repo.list_products_by_category(&id) {
        Ok(products) if products.is_empty() => {
            Err(ServiceError::NotFound(NO_PRODUCTS_FOR_CATEGORY))
        }
        Ok(products) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products by category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn search_products<R>(pattern: &str, repo: &R) -> ServiceResult<Vec<CategorizedProduct>>
where
    R: ProductReader,
{
    match repo.search_products(pattern) {
        Ok(products) => Ok(products),
        Err(e) => {
            log::error!("Failed to search products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Bulk insert: each record only has to pass the field-presence check (the
/// category reference is not re-verified here). Invalid records are silently
/// discarded; partial success is allowed. An empty accepted set is an error.
pub fn create_products<R>(body: Value, repo: &R) -> ServiceResult<HashMap<usize, Identifier>>
where
    R: ProductWriter,
{
    let records = match body {
        Value::Array(records) => records,
        _ => Vec::new(),
    };

    let now = Utc::now().naive_utc();
    let mut accepted = Vec::new();
    for record in records {
        let Value::Object(map) = record else { continue };
        if validate_fields(&map, &PRODUCT_REQUIRED_FIELDS).is_err() {
            continue;
        }
        let Ok(form) = serde_json::from_value::<ProductForm>(Value::Object(map)) else {
            continue;
        };
        let Ok(category_id) = Identifier::parse(form.category_id.as_str()) else {
            continue;
        };
        accepted.push(NewProduct {
            name: form.name,
            category_id,
            price: form.price,
            description: form.description,
            brand: form.brand,
            stock: form.stock,
            created_at: now,
            updated_at: now,
        });
    }

    if accepted.is_empty() {
        return Err(ServiceError::NoValidProducts);
    }

    match repo.create_products(&accepted) {
        Ok(ids) => Ok(ids.into_iter().enumerate().collect()),
        Err(e) => {
            log::error!("Failed to bulk insert products: {e}");
            Err(ServiceError::Internal)
        }
    }
}
