//! Driving port for toggling favourites and cart entries.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RecipeSummary, RelationKind, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRelationsCommand: Send + Sync {
    /// Add the recipe to the user's list. A repeated add fails with `400`.
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<RecipeSummary, Error>;

    /// Remove the recipe from the user's list. Removing an absent entry fails
    /// with `400`.
    async fn remove(&self, kind: RelationKind, user: &UserId, recipe: RecipeId)
    -> Result<(), Error>;
}
