//! Driving port for reading recipes.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{Error, RecipeId, RecipeListQuery, RecipeView, UserId};

/// Read-side recipe use-cases, open to anonymous viewers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Page through recipes newest first.
    async fn list_recipes(
        &self,
        viewer: Option<UserId>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeView>, Error>;

    async fn get_recipe(&self, viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error>;
}
