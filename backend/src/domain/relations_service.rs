//! Favourites, shopping cart, and the shopping list derived from the cart.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    RecipeRelationRepository, RecipeRelationsCommand, RecipeRepository, ShoppingListQuery,
};
use super::{Error, RecipeId, RecipeSummary, RelationKind, ShoppingList, UserId};

/// Implements [`RecipeRelationsCommand`] and [`ShoppingListQuery`].
#[derive(Clone)]
pub struct RecipeRelationsService<R, L> {
    recipes: Arc<R>,
    relations: Arc<L>,
}

impl<R, L> RecipeRelationsService<R, L> {
    pub fn new(recipes: Arc<R>, relations: Arc<L>) -> Self {
        Self { recipes, relations }
    }
}

impl<R: RecipeRepository, L> RecipeRelationsService<R, L> {
    async fn summary(&self, recipe: RecipeId) -> Result<RecipeSummary, Error> {
        self.recipes
            .find(recipe)
            .await?
            .map(|record| record.summary())
            .ok_or_else(|| Error::not_found(format!("recipe {recipe} not found")))
    }
}

#[async_trait]
impl<R, L> RecipeRelationsCommand for RecipeRelationsService<R, L>
where
    R: RecipeRepository,
    L: RecipeRelationRepository,
{
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<RecipeSummary, Error> {
        let summary = self.summary(recipe).await?;
        if !self.relations.add(kind, user, recipe).await? {
            return Err(Error::invalid_request(kind.duplicate_message()));
        }
        info!(%kind, user = %user, recipe_id = %recipe, "relation added");
        Ok(summary)
    }

    async fn remove(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<(), Error> {
        self.summary(recipe).await?;
        if !self.relations.remove(kind, user, recipe).await? {
            return Err(Error::invalid_request(kind.missing_message()));
        }
        info!(%kind, user = %user, recipe_id = %recipe, "relation removed");
        Ok(())
    }
}

#[async_trait]
impl<R, L> ShoppingListQuery for RecipeRelationsService<R, L>
where
    R: RecipeRepository,
    L: RecipeRelationRepository,
{
    async fn shopping_list(&self, user: &UserId) -> Result<ShoppingList, Error> {
        let rows = self.relations.cart_ingredients(user).await?;
        Ok(ShoppingList::aggregate(rows))
    }
}
