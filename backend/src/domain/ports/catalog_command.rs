//! Driving port for curating tags and ingredients. Admin only.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, NewIngredient, NewTag, Tag, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Create a tag. Fails with `403` for non-admins and `409` when the colour
    /// or slug is taken.
    async fn create_tag(&self, actor: &UserId, tag: NewTag) -> Result<Tag, Error>;

    async fn create_ingredient(
        &self,
        actor: &UserId,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, Error>;
}
