//! PostgreSQL-backed recipe adapter.
//!
//! A recipe spans `recipes`, `recipe_ingredients`, and `recipe_tags`. Writes
//! touch all three inside one transaction; reads load the recipe rows first
//! and then hydrate tags and ingredient lines for the whole batch with one
//! query each.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Amount, CookingTime, IngredientId, RecipeDraft, RecipeFilter, RecipeId, RecipeIngredientLine,
    RecipeRecord, RecipeSummary, Tag, UserId,
};

use super::diesel_helpers::{
    count_for_db, count_from_db, is_foreign_key_violation, map_basic_diesel_error,
    map_basic_pool_error, total_from_db,
};
use super::models::{
    NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeContentRow, RecipeRow, TagRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart, tags,
};

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

/// Writes fail on foreign keys when a referenced tag or ingredient was
/// deleted between validation and insert.
fn map_write_error(error: diesel::result::Error) -> RecipeRepositoryError {
    if is_foreign_key_violation(&error) {
        RecipeRepositoryError::missing_reference("a referenced tag or ingredient does not exist")
    } else {
        map_diesel_error(error)
    }
}

fn invalid_row(message: String) -> RecipeRepositoryError {
    RecipeRepositoryError::query(format!("invalid recipe row: {message}"))
}

fn content(draft: &RecipeDraft) -> RecipeContentRow<'_> {
    RecipeContentRow {
        name: draft.name().as_ref(),
        image: draft.image(),
        text: draft.text(),
        cooking_time: count_for_db(draft.cooking_time().minutes()),
    }
}

async fn insert_children(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    draft: &RecipeDraft,
) -> Result<(), diesel::result::Error> {
    let lines: Vec<NewRecipeIngredientRow> = draft
        .ingredients()
        .iter()
        .map(|line| NewRecipeIngredientRow {
            recipe_id,
            ingredient_id: line.ingredient_id.get(),
            amount: count_for_db(line.amount.get()),
        })
        .collect();
    diesel::insert_into(recipe_ingredients::table)
        .values(&lines)
        .execute(conn)
        .await?;

    if !draft.tags().is_empty() {
        let tag_rows: Vec<NewRecipeTagRow> = draft
            .tags()
            .iter()
            .map(|tag| NewRecipeTagRow {
                recipe_id,
                tag_id: tag.get(),
            })
            .collect();
        diesel::insert_into(recipe_tags::table)
            .values(&tag_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

type IngredientLineRow = (i64, i64, String, String, i32);

/// Load tags and ingredient lines for `rows` and assemble records in the
/// order of `rows`.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<RecipeRecord>, RecipeRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let tag_rows: Vec<(i64, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&ids))
        .order_by((tags::name.asc(), tags::id.asc()))
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (recipe_id, row) in tag_rows {
        let tag = row.into_domain().map_err(invalid_row)?;
        tags_by_recipe.entry(recipe_id).or_default().push(tag);
    }

    let line_rows: Vec<IngredientLineRow> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&ids))
        .order_by(recipe_ingredients::id.asc())
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let mut lines_by_recipe: HashMap<i64, Vec<RecipeIngredientLine>> = HashMap::new();
    for (recipe_id, ingredient_id, name, measurement_unit, raw_amount) in line_rows {
        let amount = count_from_db(raw_amount, "recipe_ingredients.amount")
            .and_then(|raw| Amount::new(raw).map_err(|err| err.to_string()))
            .map_err(invalid_row)?;
        lines_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(RecipeIngredientLine {
                id: IngredientId::new(ingredient_id),
                name,
                measurement_unit,
                amount,
            });
    }

    rows.into_iter()
        .map(|row| {
            let cooking_time = count_from_db(row.cooking_time, "recipes.cooking_time")
                .and_then(|raw| CookingTime::new(raw).map_err(|err| err.to_string()))
                .map_err(invalid_row)?;
            Ok(RecipeRecord {
                id: RecipeId::new(row.id),
                author: UserId::from_uuid(row.author_id),
                name: row.name,
                image: row.image,
                text: row.text,
                cooking_time,
                tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
                ingredients: lines_by_recipe.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Recipes matching `filter`, unordered and unpaginated.
fn filtered(filter: &RecipeFilter) -> recipes::BoxedQuery<'static, Pg> {
    let mut query = recipes::table.into_boxed();
    if let Some(author) = &filter.author {
        query = query.filter(recipes::author_id.eq(*author.as_uuid()));
    }
    if let Some(user) = &filter.favorited_by {
        query = query.filter(
            recipes::id.eq_any(
                favorites::table
                    .filter(favorites::user_id.eq(*user.as_uuid()))
                    .select(favorites::recipe_id),
            ),
        );
    }
    if let Some(user) = &filter.in_cart_of {
        query = query.filter(
            recipes::id.eq_any(
                shopping_cart::table
                    .filter(shopping_cart::user_id.eq(*user.as_uuid()))
                    .select(shopping_cart::recipe_id),
            ),
        );
    }
    if !filter.tags.is_empty() {
        let slugs: Vec<String> = filter
            .tags
            .iter()
            .map(|slug| slug.as_ref().to_owned())
            .collect();
        query = query.filter(
            recipes::id.eq_any(
                recipe_tags::table
                    .inner_join(tags::table)
                    .filter(tags::slug.eq_any(slugs))
                    .select(recipe_tags::recipe_id),
            ),
        );
    }
    query
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_id = *author.as_uuid();
        let id = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(NewRecipeRow {
                            author_id,
                            content: content(draft),
                        })
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    insert_children(conn, id, draft).await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write_error)?;
        Ok(RecipeId::new(id))
    }

    async fn replace(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let recipe_id = id.get();
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let updated = diesel::update(recipes::table.find(recipe_id))
                    .set(content(draft))
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                    .execute(conn)
                    .await?;
                insert_children(conn, recipe_id, draft).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_write_error)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Join rows, favourites, and cart entries go with it via ON DELETE CASCADE.
        let deleted = diesel::delete(recipes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find(&self, id: RecipeId) -> Result<Option<RecipeRecord>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .find(id.get())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let mut records = hydrate(&mut conn, row.into_iter().collect()).await?;
        Ok(records.pop())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeRecord>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<RecipeRow> = filtered(filter)
            .select(RecipeRow::as_select())
            .order_by(recipes::id.desc())
            .limit(i64::from(page.limit()))
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let records = hydrate(&mut conn, rows).await?;
        Ok(PageSlice::new(records, total_from_db(total)))
    }

    async fn summaries_by_author(
        &self,
        author: &UserId,
        limit: u32,
    ) -> Result<Vec<RecipeSummary>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i64, String, String, i32)> = recipes::table
            .filter(recipes::author_id.eq(*author.as_uuid()))
            .order_by(recipes::id.desc())
            .limit(i64::from(limit))
            .select((recipes::id, recipes::name, recipes::image, recipes::cooking_time))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(id, name, image, minutes)| {
                let cooking_time = count_from_db(minutes, "recipes.cooking_time")
                    .and_then(|raw| CookingTime::new(raw).map_err(|err| err.to_string()))
                    .map_err(invalid_row)?;
                Ok(RecipeSummary {
                    id: RecipeId::new(id),
                    name,
                    image,
                    cooking_time,
                })
            })
            .collect()
    }

    async fn count_by_author(&self, author: &UserId) -> Result<u64, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = recipes::table
            .filter(recipes::author_id.eq(*author.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(total_from_db(total))
    }
}
