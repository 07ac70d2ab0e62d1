//! Business rules for the category resource.
//!
//! Category endpoints never distinguish a malformed identifier from a
//! missing one: any id that does not parse reads as not-found. This differs
//! deliberately from the product path, which answers 422 for malformed ids.

use std::collections::HashMap;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::Identifier;
use crate::repository::{CategoryReader, CategoryWriter, ProductReader, RepositoryError};

use super::{ServiceError, ServiceResult};

pub(crate) const CATEGORY_NOT_FOUND: &str = "Category not found";
pub(crate) const CATEGORY_EXISTS: &str = "Category already exists";
const NAME_REQUIRED: &str = "\"name\" is required";

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_category<R>(raw_id: &str, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let Ok(id) = Identifier::parse(raw_id) else {
        return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND));
    };

    match repo.get_category_by_id(&id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Extracts a usable name or fails with the canonical validation message.
fn require_name(name: Option<String>) -> ServiceResult<String> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ServiceError::Validation(NAME_REQUIRED.to_string())),
    }
}

/// Fails with a conflict when a category with exactly this name exists.
fn reject_duplicate_name<R>(name: &str, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.find_category_by_name(name) {
        Ok(Some(_)) => Err(ServiceError::Conflict(CATEGORY_EXISTS)),
        Ok(None) => Ok(()),
        Err(e) => {
            log::error!("Failed to look up category by name: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_category<R>(name: Option<String>, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    let name = require_name(name)?;
    reject_duplicate_name(&name, repo)?;

    match repo.create_category(&NewCategory { name }) {
        Ok(category) => Ok(category),
        // Backstop for the check-then-act race: the store's unique index wins.
        Err(RepositoryError::Duplicate) => Err(ServiceError::Conflict(CATEGORY_EXISTS)),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Renames a category. The name checks run before the id is resolved, so a
/// rename to a colliding name short-circuits with a conflict even when the
/// target id does not exist.
pub fn update_category<R>(raw_id: &str, name: Option<String>, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    let name = require_name(name)?;
    reject_duplicate_name(&name, repo)?;

    let Ok(id) = Identifier::parse(raw_id) else {
        return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND));
    };

    match repo.update_category(&id, &name) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Err(RepositoryError::Duplicate) => Err(ServiceError::Conflict(CATEGORY_EXISTS)),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_category<R>(raw_id: &str, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + ProductReader,
{
    let Ok(id) = Identifier::parse(raw_id) else {
        return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND));
    };

    match repo.category_in_use(&id) {
        Ok(true) => return Err(ServiceError::CategoryInUse),
        Ok(false) => {}
        Err(e) => {
            log::error!("Failed to check category references: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(&id) {
        Ok(0) => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn search_categories<R>(pattern: &str, repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.search_categories(pattern) {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to search categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Inserts a batch of categories unconditionally (no per-record validation)
/// and returns the minted identifier for each accepted record, keyed by its
/// position in the accepted subset.
pub fn create_categories<R>(
    names: Vec<String>,
    repo: &R,
) -> ServiceResult<HashMap<usize, Identifier>>
where
    R: CategoryWriter,
{
    let records: Vec<NewCategory> = names.into_iter().map(|name| NewCategory { name }).collect();

    match repo.create_categories(&records) {
        Ok(ids) => Ok(ids.into_iter().enumerate().collect()),
        Err(e) => {
            log::error!("Failed to bulk insert categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::TestRepository;

    fn repo_with(names: &[&str]) -> TestRepository {
        let repo = TestRepository::new();
        for name in names {
            repo.create_category(&NewCategory {
                name: name.to_string(),
            })
            .unwrap();
        }
        repo
    }

    #[test]
    fn creates_category_with_fresh_name() {
        let repo = TestRepository::new();
        let category = create_category(Some("Alimentos".to_string()), &repo).unwrap();
        assert_eq!(category.name, "Alimentos");
        assert!(Identifier::is_valid(category.id.as_str()));
    }

    #[test]
    fn create_rejects_missing_or_empty_name() {
        let repo = TestRepository::new();
        let err = create_category(None, &repo).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation("\"name\" is required".to_string())
        );
        let err = create_category(Some(String::new()), &repo).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation("\"name\" is required".to_string())
        );
    }

    #[test]
    fn create_rejects_exact_duplicate_name() {
        let repo = repo_with(&["Bebidas"]);
        let err = create_category(Some("Bebidas".to_string()), &repo).unwrap_err();
        assert_eq!(err, ServiceError::Conflict(CATEGORY_EXISTS));
    }

    #[test]
    fn duplicate_check_is_case_sensitive_exact_match() {
        let repo = repo_with(&["Bebidas"]);
        assert!(create_category(Some("bebidas".to_string()), &repo).is_ok());
    }

    #[test]
    fn rename_conflict_wins_over_not_found() {
        // The colliding name short-circuits before the target id is resolved.
        let repo = repo_with(&["Bebidas"]);
        let err = update_category(
            "64f1c2a0deadbeef01234567",
            Some("Bebidas".to_string()),
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::Conflict(CATEGORY_EXISTS));
    }

    #[test]
    fn rename_of_unknown_or_malformed_id_reads_as_not_found() {
        let repo = repo_with(&["Bebidas"]);
        let err = update_category(
            "64f1c2a0deadbeef01234567",
            Some("Limpeza".to_string()),
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND));

        let err = update_category("123", Some("Limpeza".to_string()), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND));
    }

    #[test]
    fn rename_updates_the_category() {
        let repo = repo_with(&["Bebidas"]);
        let id = repo
            .find_category_by_name("Bebidas")
            .unwrap()
            .unwrap()
            .id;
        let updated = update_category(id.as_str(), Some("Limpeza".to_string()), &repo).unwrap();
        assert_eq!(updated.name, "Limpeza");
        assert_eq!(updated.id, id);
    }

    #[test]
    fn delete_is_blocked_while_a_product_references_the_category() {
        use crate::domain::product::NewProduct;
        use crate::repository::ProductWriter;

        let repo = repo_with(&["Alimentos"]);
        let category = repo.find_category_by_name("Alimentos").unwrap().unwrap();
        let now = chrono::Utc::now().naive_utc();
        repo.create_product(&NewProduct {
            name: "Arroz".to_string(),
            category_id: category.id.clone(),
            price: 5.99,
            description: "grão".to_string(),
            brand: "Tio João".to_string(),
            stock: 10,
            created_at: now,
            updated_at: now,
        })
        .unwrap();

        let err = delete_category(category.id.as_str(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::CategoryInUse);
        // The category must survive the rejected delete.
        assert!(repo.get_category_by_id(&category.id).unwrap().is_some());
    }

    #[test]
    fn delete_of_unknown_id_reads_as_not_found() {
        let repo = TestRepository::new();
        let err = delete_category("64f1c2a0deadbeef01234567", &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND));
        let err = delete_category("123", &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND));
    }

    #[test]
    fn delete_removes_an_unreferenced_category() {
        let repo = repo_with(&["Alimentos"]);
        let category = repo.find_category_by_name("Alimentos").unwrap().unwrap();
        delete_category(category.id.as_str(), &repo).unwrap();
        assert!(repo.get_category_by_id(&category.id).unwrap().is_none());
    }

    #[test]
    fn search_matches_substring_case_insensitively() {
        let repo = repo_with(&["Alimentos", "Bebidas", "Limpeza"]);
        let found = search_categories("LIM", &repo).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Limpeza");
        assert!(search_categories("xyz", &repo).unwrap().is_empty());
    }

    #[test]
    fn bulk_insert_returns_index_to_id_mapping() {
        let repo = TestRepository::new();
        let ids = create_categories(
            vec!["Alimentos".to_string(), "Bebidas".to_string()],
            &repo,
        )
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains_key(&0));
        assert!(ids.contains_key(&1));
    }

    #[test]
    fn get_with_malformed_id_reads_as_not_found() {
        let repo = repo_with(&["Alimentos"]);
        let err = get_category("123", &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND));
    }
}
