use diesel::prelude::*;

use crate::domain::product::{CategorizedProduct, NewProduct, Product, ProductUpdate};
use crate::domain::types::Identifier;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset,
};
use crate::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryResult, map_write_error,
};

/// Maps a joined row into the read projection, replacing the raw category id
/// with the category name.
fn project(row: (DbProduct, String)) -> RepositoryResult<CategorizedProduct> {
    let (product, category) = row;
    let product: Product = product.try_into()?;
    Ok(CategorizedProduct::project(product, category))
}

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<CategorizedProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        // Inner join: products with a dangling category are dropped.
        let rows = products::table
            .inner_join(categories::table)
            .select((products::all_columns, categories::name))
            .load::<(DbProduct, String)>(&mut conn)?;

        rows.into_iter().map(project).collect()
    }

    fn get_product_by_id(&self, id: &Identifier) -> RepositoryResult<Option<CategorizedProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let row = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id.as_str()))
            .select((products::all_columns, categories::name))
            .first::<(DbProduct, String)>(&mut conn)
            .optional()?;

        row.map(project).transpose()
    }

    fn find_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::name.eq(name))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }

    fn search_products(&self, pattern: &str) -> RepositoryResult<Vec<CategorizedProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let rows = products::table
            .inner_join(categories::table)
            .filter(products::name.like(format!("%{pattern}%")))
            .select((products::all_columns, categories::name))
            .load::<(DbProduct, String)>(&mut conn)?;

        rows.into_iter().map(project).collect()
    }

    fn list_products_by_category(
        &self,
        category_id: &Identifier,
    ) -> RepositoryResult<Vec<CategorizedProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let rows = products::table
            .inner_join(categories::table)
            .filter(products::category_id.eq(category_id.as_str()))
            .select((products::all_columns, categories::name))
            .load::<(DbProduct, String)>(&mut conn)?;

        rows.into_iter().map(project).collect()
    }

    fn category_in_use(&self, category_id: &Identifier) -> RepositoryResult<bool> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let in_use = diesel::select(diesel::dsl::exists(
            products::table.filter(products::category_id.eq(category_id.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(in_use)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let id = Identifier::generate();
        let db_product = DbNewProduct::from_domain(id.clone(), product);

        diesel::insert_into(products::table)
            .values(&db_product)
            .execute(&mut conn)
            .map_err(map_write_error)?;

        Ok(Product {
            id,
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            price: product.price,
            description: product.description.clone(),
            brand: product.brand.clone(),
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }

    fn update_product(&self, id: &Identifier, changes: &ProductUpdate) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let changeset: ProductChangeset = changes.clone().into();

        let affected = diesel::update(products::table.filter(products::id.eq(id.as_str())))
            .set(&changeset)
            .execute(&mut conn)
            .map_err(map_write_error)?;

        Ok(affected)
    }

    fn delete_product(&self, id: &Identifier) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.filter(products::id.eq(id.as_str())))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_products(&self, products: &[NewProduct]) -> RepositoryResult<Vec<Identifier>> {
        use crate::schema::products as products_table;

        let mut conn = self.conn()?;

        let mut inserted = Vec::with_capacity(products.len());
        for product in products {
            let id = Identifier::generate();
            let db_product = DbNewProduct::from_domain(id.clone(), product);

            // Unordered batch semantics: a failing record is skipped, not fatal.
            match diesel::insert_into(products_table::table)
                .values(&db_product)
                .execute(&mut conn)
            {
                Ok(_) => inserted.push(id),
                Err(e) => {
                    log::warn!("Skipping product in batch insert: {e}");
                }
            }
        }

        Ok(inserted)
    }
}
