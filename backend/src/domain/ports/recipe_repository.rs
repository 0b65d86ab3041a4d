//! Port for recipe persistence.
//!
//! Recipes are written as a whole: insert and replace take a complete
//! [`RecipeDraft`] and store its ingredient and tag sets in the same
//! transaction as the recipe row. Deleting a recipe removes its join rows and
//! every favourite and cart entry pointing at it.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{RecipeDraft, RecipeFilter, RecipeId, RecipeRecord, RecipeSummary, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError("recipe repository") {
        /// The draft references a tag or ingredient that does not exist.
        MissingReference { message: String } => "recipe references missing rows: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Store a new recipe and return its id.
    async fn insert(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError>;

    /// Replace every field of an existing recipe. Returns `false` when the
    /// recipe does not exist.
    async fn replace(&self, id: RecipeId, draft: &RecipeDraft)
    -> Result<bool, RecipeRepositoryError>;

    /// Delete a recipe and everything hanging off it. Returns `false` when the
    /// recipe does not exist.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError>;

    async fn find(&self, id: RecipeId) -> Result<Option<RecipeRecord>, RecipeRepositoryError>;

    /// Page through recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeRecord>, RecipeRepositoryError>;

    /// Newest recipes of one author, at most `limit` of them.
    async fn summaries_by_author(
        &self,
        author: &UserId,
        limit: u32,
    ) -> Result<Vec<RecipeSummary>, RecipeRepositoryError>;

    async fn count_by_author(&self, author: &UserId) -> Result<u64, RecipeRepositoryError>;
}
