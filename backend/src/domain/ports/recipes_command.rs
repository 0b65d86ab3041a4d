//! Driving port for authoring recipes.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDraft, RecipeId, RecipeView, UserId};

/// Write-side recipe use-cases.
///
/// Updates and deletes are limited to the recipe's author and admins; other
/// callers receive `403`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    async fn create_recipe(&self, actor: &UserId, draft: RecipeDraft) -> Result<RecipeView, Error>;

    async fn update_recipe(
        &self,
        actor: &UserId,
        id: RecipeId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error>;

    async fn delete_recipe(&self, actor: &UserId, id: RecipeId) -> Result<(), Error>;
}
