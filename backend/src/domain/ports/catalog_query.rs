//! Driving port for browsing tags and ingredients.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientId, Tag, TagId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;

    async fn get_tag(&self, id: TagId) -> Result<Tag, Error>;

    /// Ingredients ordered by name, optionally narrowed to a name prefix.
    async fn list_ingredients(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, Error>;

    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error>;
}
