use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::Identifier;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryResult, map_write_error,
};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: &Identifier) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::name.eq(name))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn search_categories(&self, pattern: &str) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // SQLite LIKE is case-insensitive for ASCII.
        let items = categories::table
            .filter(categories::name.like(format!("%{pattern}%")))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let id = Identifier::generate();
        let db_category = DbNewCategory {
            id: id.as_str().to_string(),
            name: category.name.clone(),
        };

        diesel::insert_into(categories::table)
            .values(&db_category)
            .execute(&mut conn)
            .map_err(map_write_error)?;

        Ok(Category {
            id,
            name: db_category.name,
        })
    }

    fn update_category(&self, id: &Identifier, name: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(categories::table.filter(categories::id.eq(id.as_str())))
                .set(categories::name.eq(name))
                .execute(&mut conn)
                .map_err(map_write_error)?;

        if affected == 0 {
            return Ok(None);
        }

        Ok(Some(Category {
            id: id.clone(),
            name: name.to_string(),
        }))
    }

    fn delete_category(&self, id: &Identifier) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(categories::table.filter(categories::id.eq(id.as_str())))
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_categories(&self, categories: &[NewCategory]) -> RepositoryResult<Vec<Identifier>> {
        use crate::schema::categories as categories_table;

        let mut conn = self.conn()?;

        let mut inserted = Vec::with_capacity(categories.len());
        for category in categories {
            let id = Identifier::generate();
            let db_category = DbNewCategory {
                id: id.as_str().to_string(),
                name: category.name.clone(),
            };

            // Unordered batch semantics: a failing record is skipped, not fatal.
            match diesel::insert_into(categories_table::table)
                .values(&db_category)
                .execute(&mut conn)
            {
                Ok(_) => inserted.push(id),
                Err(e) => {
                    log::warn!("Skipping category in batch insert: {e}");
                }
            }
        }

        Ok(inserted)
    }
}
