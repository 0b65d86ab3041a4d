//! Port for tag and ingredient storage.
use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId, NewIngredient, NewTag, Tag, TagId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalog repository adapters.
    pub enum CatalogRepositoryError("catalog repository") {
        /// A unique column already holds the submitted value.
        Duplicate { field: String } => "catalog value for {field} already exists",
    }
}

/// Tag and ingredient persistence.
///
/// Both lists are ordered by name. Catalog entries are never deleted through
/// this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogRepositoryError>;

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogRepositoryError>;

    /// Insert a tag. Fails with [`CatalogRepositoryError::Duplicate`] naming
    /// `color` or `slug` when either is taken.
    async fn insert_tag(&self, tag: &NewTag) -> Result<Tag, CatalogRepositoryError>;

    /// List ingredients whose name starts with `name_prefix`, ignoring case.
    async fn list_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError>;

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogRepositoryError>;

    async fn insert_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, CatalogRepositoryError>;

    /// Return the subset of `ids` that does not exist.
    async fn missing_tags(&self, ids: &[TagId]) -> Result<Vec<TagId>, CatalogRepositoryError>;

    /// Return the subset of `ids` that does not exist.
    async fn missing_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, CatalogRepositoryError>;
}
