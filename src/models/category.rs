use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{Identifier, IdentifierError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Insertable form of [`Category`]. The id is minted before insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub id: String,
    pub name: String,
}

impl TryFrom<Category> for DomainCategory {
    type Error = IdentifierError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Identifier::parse(category.id)?,
            name: category.name,
        })
    }
}
