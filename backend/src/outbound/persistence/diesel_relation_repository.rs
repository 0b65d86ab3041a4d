//! PostgreSQL-backed favourites and shopping-cart adapter.
//!
//! Favourites and cart entries live in separate tables with the same shape;
//! each method dispatches on [`RelationKind`] to pick one.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRelationRepository, RelationRepositoryError};
use crate::domain::{
    Amount, CartIngredientRow, RecipeId, RecipeMemberships, RelationKind, UserId,
};

use super::diesel_helpers::{
    count_from_db, is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewCartRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, ingredients, recipe_ingredients, shopping_cart};

/// Diesel-backed implementation of the relation repository port.
#[derive(Clone)]
pub struct DieselRelationRepository {
    pool: DbPool,
}

impl DieselRelationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RelationRepositoryError {
    map_basic_pool_error(error, RelationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RelationRepositoryError {
    map_basic_diesel_error(
        error,
        RelationRepositoryError::query,
        RelationRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error) -> RelationRepositoryError {
    if is_foreign_key_violation(&error) {
        RelationRepositoryError::query("user or recipe does not exist")
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl RecipeRelationRepository for DieselRelationRepository {
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = *user.as_uuid();
        let recipe_id = recipe.get();
        let inserted = match kind {
            RelationKind::Favorite => {
                diesel::insert_into(favorites::table)
                    .values(NewFavoriteRow { user_id, recipe_id })
                    .on_conflict((favorites::user_id, favorites::recipe_id))
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            RelationKind::ShoppingCart => {
                diesel::insert_into(shopping_cart::table)
                    .values(NewCartRow { user_id, recipe_id })
                    .on_conflict((shopping_cart::user_id, shopping_cart::recipe_id))
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_insert_error)?;
        Ok(inserted == 1)
    }

    async fn remove(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = *user.as_uuid();
        let recipe_id = recipe.get();
        let deleted = match kind {
            RelationKind::Favorite => {
                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await
            }
            RelationKind::ShoppingCart => {
                diesel::delete(
                    shopping_cart::table
                        .filter(shopping_cart::user_id.eq(user_id))
                        .filter(shopping_cart::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn memberships(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<RecipeMemberships, RelationRepositoryError> {
        if recipes.is_empty() {
            return Ok(RecipeMemberships::default());
        }
        let user_id = *user.as_uuid();
        let ids: Vec<i64> = recipes.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let favorite_ids: Vec<i64> = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::recipe_id.eq_any(&ids))
            .select(favorites::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let cart_ids: Vec<i64> = shopping_cart::table
            .filter(shopping_cart::user_id.eq(user_id))
            .filter(shopping_cart::recipe_id.eq_any(&ids))
            .select(shopping_cart::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let to_set = |raw: Vec<i64>| raw.into_iter().map(RecipeId::new).collect::<HashSet<_>>();
        Ok(RecipeMemberships {
            favorites: to_set(favorite_ids),
            cart: to_set(cart_ids),
        })
    }

    async fn cart_ingredients(
        &self,
        user: &UserId,
    ) -> Result<Vec<CartIngredientRow>, RelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, String, i32)> = shopping_cart::table
            .inner_join(
                recipe_ingredients::table
                    .on(recipe_ingredients::recipe_id.eq(shopping_cart::recipe_id)),
            )
            .inner_join(
                ingredients::table.on(ingredients::id.eq(recipe_ingredients::ingredient_id)),
            )
            .filter(shopping_cart::user_id.eq(*user.as_uuid()))
            .order_by((shopping_cart::id.asc(), recipe_ingredients::id.asc()))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(name, measurement_unit, raw_amount)| {
                let amount = count_from_db(raw_amount, "recipe_ingredients.amount")
                    .and_then(|value| Amount::new(value).map_err(|err| err.to_string()))
                    .map_err(|message| {
                        RelationRepositoryError::query(format!("invalid cart row: {message}"))
                    })?;
                Ok(CartIngredientRow {
                    name,
                    measurement_unit,
                    amount,
                })
            })
            .collect()
    }
}
