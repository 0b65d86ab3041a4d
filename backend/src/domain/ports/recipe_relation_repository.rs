//! Port for favourites and shopping-cart entries.
//!
//! Each relation is a unique `(user, recipe)` pair. Adds and removes report
//! whether a row was actually written so callers can tell duplicates and
//! misses apart without a separate existence check.

use async_trait::async_trait;

use crate::domain::{CartIngredientRow, RecipeId, RecipeMemberships, RelationKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by relation repository adapters.
    pub enum RelationRepositoryError("relation repository") {}
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRelationRepository: Send + Sync {
    /// Atomically insert the pair unless it exists. Returns `true` when a row
    /// was inserted.
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RelationRepositoryError>;

    /// Delete the pair. Returns `true` when a row was deleted.
    async fn remove(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RelationRepositoryError>;

    /// Which of `recipes` the user has favourited or carted.
    async fn memberships(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<RecipeMemberships, RelationRepositoryError>;

    /// One row per ingredient of every recipe in the user's cart, in storage
    /// order.
    async fn cart_ingredients(
        &self,
        user: &UserId,
    ) -> Result<Vec<CartIngredientRow>, RelationRepositoryError>;
}
