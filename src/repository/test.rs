use std::cell::RefCell;

use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{CategorizedProduct, NewProduct, Product, ProductUpdate};
use crate::domain::types::Identifier;
use crate::repository::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult,
};

/// Simple in-memory repository used for unit tests.
///
/// Mirrors the store's behavior closely enough for the service layer: names
/// are unique, batch inserts skip failing records, and projected reads use an
/// explicit two-step lookup that drops products with a dangling category.
#[derive(Default)]
pub struct TestRepository {
    categories: RefCell<Vec<Category>>,
    products: RefCell<Vec<Product>>,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.categories.borrow_mut().extend(categories);
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.products.borrow_mut().extend(products);
        self
    }

    fn category_name(&self, category_id: &Identifier) -> Option<String> {
        self.categories
            .borrow()
            .iter()
            .find(|c| &c.id == category_id)
            .map(|c| c.name.clone())
    }

    /// Two-step projection: look up each product's category and drop the
    /// product when the category is gone.
    fn project_all<'a, I>(&self, products: I) -> Vec<CategorizedProduct>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .filter_map(|p| {
                self.category_name(&p.category_id)
                    .map(|name| CategorizedProduct::project(p.clone(), name))
            })
            .collect()
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.borrow().clone())
    }

    fn get_category_by_id(&self, id: &Identifier) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }

    fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    fn search_categories(&self, pattern: &str) -> RepositoryResult<Vec<Category>> {
        let pattern = pattern.to_lowercase();
        Ok(self
            .categories
            .borrow()
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&pattern))
            .cloned()
            .collect())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        if self.find_category_by_name(&category.name)?.is_some() {
            return Err(RepositoryError::Duplicate);
        }
        let created = Category {
            id: Identifier::generate(),
            name: category.name.clone(),
        };
        self.categories.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_category(&self, id: &Identifier, name: &str) -> RepositoryResult<Option<Category>> {
        let mut categories = self.categories.borrow_mut();
        match categories.iter_mut().find(|c| &c.id == id) {
            Some(category) => {
                category.name = name.to_string();
                Ok(Some(category.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_category(&self, id: &Identifier) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let before = categories.len();
        categories.retain(|c| &c.id != id);
        Ok(before - categories.len())
    }

    fn create_categories(&self, categories: &[NewCategory]) -> RepositoryResult<Vec<Identifier>> {
        let mut inserted = Vec::new();
        for category in categories {
            if let Ok(created) = self.create_category(category) {
                inserted.push(created.id);
            }
        }
        Ok(inserted)
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self) -> RepositoryResult<Vec<CategorizedProduct>> {
        Ok(self.project_all(self.products.borrow().iter()))
    }

    fn get_product_by_id(&self, id: &Identifier) -> RepositoryResult<Option<CategorizedProduct>> {
        let products = self.products.borrow();
        let Some(product) = products.iter().find(|p| &p.id == id) else {
            return Ok(None);
        };
        Ok(self
            .category_name(&product.category_id)
            .map(|name| CategorizedProduct::project(product.clone(), name)))
    }

    fn find_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        Ok(self
            .products
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    fn search_products(&self, pattern: &str) -> RepositoryResult<Vec<CategorizedProduct>> {
        let pattern = pattern.to_lowercase();
        let products = self.products.borrow();
        Ok(self.project_all(
            products
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&pattern)),
        ))
    }

    fn list_products_by_category(
        &self,
        category_id: &Identifier,
    ) -> RepositoryResult<Vec<CategorizedProduct>> {
        let products = self.products.borrow();
        Ok(self.project_all(
            products
                .iter()
                .filter(|p| &p.category_id == category_id),
        ))
    }

    fn category_in_use(&self, category_id: &Identifier) -> RepositoryResult<bool> {
        Ok(self
            .products
            .borrow()
            .iter()
            .any(|p| &p.category_id == category_id))
    }
}

impl ProductWriter for TestRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        if self.find_product_by_name(&product.name)?.is_some() {
            return Err(RepositoryError::Duplicate);
        }
        let created = Product {
            id: Identifier::generate(),
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            price: product.price,
            description: product.description.clone(),
            brand: product.brand.clone(),
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        };
        self.products.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_product(&self, id: &Identifier, changes: &ProductUpdate) -> RepositoryResult<usize> {
        let mut products = self.products.borrow_mut();
        let Some(product) = products.iter_mut().find(|p| &p.id == id) else {
            return Ok(0);
        };
        if let Some(name) = &changes.name {
            product.name = name.clone();
        }
        if let Some(category_id) = &changes.category_id {
            product.category_id = category_id.clone();
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(description) = &changes.description {
            product.description = description.clone();
        }
        if let Some(brand) = &changes.brand {
            product.brand = brand.clone();
        }
        if let Some(stock) = changes.stock {
            product.stock = stock;
        }
        product.updated_at = changes.updated_at;
        Ok(1)
    }

    fn delete_product(&self, id: &Identifier) -> RepositoryResult<usize> {
        let mut products = self.products.borrow_mut();
        let before = products.len();
        products.retain(|p| &p.id != id);
        Ok(before - products.len())
    }

    fn create_products(&self, products: &[NewProduct]) -> RepositoryResult<Vec<Identifier>> {
        let mut inserted = Vec::new();
        for product in products {
            if let Ok(created) = self.create_product(product) {
                inserted.push(created.id);
            }
        }
        Ok(inserted)
    }
}
