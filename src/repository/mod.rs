use thiserror::Error;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{CategorizedProduct, NewProduct, Product, ProductUpdate};
use crate::domain::types::{Identifier, IdentifierError};

pub mod category;
pub mod product;
#[cfg(test)]
pub mod test;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An insert or update violated a uniqueness constraint.
    #[error("record violates a uniqueness constraint")]
    Duplicate,
    /// A stored identifier failed to parse back into the domain type.
    #[error("stored identifier is malformed: {0}")]
    InvalidStoredId(#[from] IdentifierError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Translates unique-constraint violations into [`RepositoryError::Duplicate`]
/// so the service layer can map them to a conflict.
fn map_write_error(e: diesel::result::Error) -> RepositoryError {
    match e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ) => RepositoryError::Duplicate,
        other => RepositoryError::Database(other),
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: &Identifier) -> RepositoryResult<Option<Category>>;
    /// Exact-match lookup by name, used for the uniqueness check.
    fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    /// Case-insensitive substring search over category names.
    fn search_categories(&self, pattern: &str) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category, minting its identifier.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename a category, returning the updated record if it exists.
    fn update_category(&self, id: &Identifier, name: &str) -> RepositoryResult<Option<Category>>;
    /// Delete a category, returning the number of affected rows.
    fn delete_category(&self, id: &Identifier) -> RepositoryResult<usize>;
    /// Insert a batch of categories. Records that fail to insert are skipped
    /// so one failure does not block the rest; minted identifiers are
    /// returned in insertion order.
    fn create_categories(&self, categories: &[NewCategory]) -> RepositoryResult<Vec<Identifier>>;
}

/// Read-only operations for product entities.
///
/// Projected reads join each product with its category name and drop
/// products whose category no longer exists.
pub trait ProductReader {
    /// List every product, projected.
    fn list_products(&self) -> RepositoryResult<Vec<CategorizedProduct>>;
    /// Retrieve a product by its identifier, projected.
    fn get_product_by_id(&self, id: &Identifier) -> RepositoryResult<Option<CategorizedProduct>>;
    /// Exact-match lookup by name, unprojected, used for the uniqueness check.
    fn find_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>>;
    /// Case-insensitive substring search over product names, projected.
    fn search_products(&self, pattern: &str) -> RepositoryResult<Vec<CategorizedProduct>>;
    /// List the products referencing a category, projected.
    fn list_products_by_category(
        &self,
        category_id: &Identifier,
    ) -> RepositoryResult<Vec<CategorizedProduct>>;
    /// Whether any product references the given category.
    fn category_in_use(&self, category_id: &Identifier) -> RepositoryResult<bool>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product, minting its identifier.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Apply a partial change set, returning the number of affected rows.
    fn update_product(&self, id: &Identifier, changes: &ProductUpdate) -> RepositoryResult<usize>;
    /// Delete a product, returning the number of affected rows.
    fn delete_product(&self, id: &Identifier) -> RepositoryResult<usize>;
    /// Insert a batch of products. Records that fail to insert are skipped
    /// so one failure does not block the rest; minted identifiers are
    /// returned in insertion order.
    fn create_products(&self, products: &[NewProduct]) -> RepositoryResult<Vec<Identifier>>;
}
