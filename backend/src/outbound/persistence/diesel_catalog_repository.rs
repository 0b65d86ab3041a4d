//! PostgreSQL-backed tag and ingredient adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};
use crate::domain::{Ingredient, IngredientId, NewIngredient, NewTag, Tag, TagId};

use super::diesel_helpers::{
    collect_rows, map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{IngredientRow, NewIngredientRow, NewTagRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

/// Diesel-backed implementation of the catalog repository port.
#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogRepositoryError {
    map_basic_pool_error(error, CatalogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogRepositoryError::query,
        CatalogRepositoryError::connection,
    )
}

/// Map a failed tag insert, naming the unique column that was hit.
fn map_tag_insert_error(error: diesel::result::Error) -> CatalogRepositoryError {
    match unique_violation(&error) {
        Some(constraint) if constraint.contains("color") => {
            CatalogRepositoryError::duplicate("color")
        }
        Some(constraint) if constraint.contains("slug") => CatalogRepositoryError::duplicate("slug"),
        _ => map_diesel_error(error),
    }
}

fn invalid_row(message: String) -> CatalogRepositoryError {
    CatalogRepositoryError::query(format!("invalid catalog row: {message}"))
}

diesel::define_sql_function!(fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text);

/// Escape `LIKE` wildcards so user input matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl CatalogRepository for DieselCatalogRepository {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .order_by((tags::name.asc(), tags::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(TagRow::into_domain), invalid_row)
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TagRow> = tags::table
            .filter(tags::id.eq(id.get()))
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(TagRow::into_domain).transpose().map_err(invalid_row)
    }

    async fn insert_tag(&self, tag: &NewTag) -> Result<Tag, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: TagRow = diesel::insert_into(tags::table)
            .values(NewTagRow {
                name: tag.name.as_ref(),
                color: tag.color.as_ref(),
                slug: tag.slug.as_ref(),
            })
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_tag_insert_error)?;
        row.into_domain().map_err(invalid_row)
    }

    async fn list_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .order_by((ingredients::name.asc(), ingredients::id.asc()))
            .into_boxed();
        if let Some(prefix) = name_prefix {
            query = query.filter(lower(ingredients::name).like(like_prefix(&prefix)));
        }
        let rows: Vec<IngredientRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(IngredientRow::into_domain), invalid_row)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq(id.get()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(IngredientRow::into_domain)
            .transpose()
            .map_err(invalid_row)
    }

    async fn insert_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: IngredientRow = diesel::insert_into(ingredients::table)
            .values(NewIngredientRow {
                name: ingredient.name.as_ref(),
                measurement_unit: ingredient.measurement_unit.as_ref(),
            })
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_domain().map_err(invalid_row)
    }

    async fn missing_tags(&self, ids: &[TagId]) -> Result<Vec<TagId>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<i64> = tags::table
            .filter(tags::id.eq_any(&raw))
            .select(tags::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !found.contains(&id.get()))
            .collect())
    }

    async fn missing_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<i64> = ingredients::table
            .filter(ingredients::id.eq_any(&raw))
            .select(ingredients::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !found.contains(&id.get()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fl", "fl%")]
    #[case("Sug", "sug%")]
    #[case("50%_off", "50\\%\\_off%")]
    #[case("", "%")]
    fn like_prefix_escapes_wildcards(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(like_prefix(raw), expected);
    }

    #[rstest]
    fn non_unique_failures_fall_back_to_query_errors() {
        assert_eq!(
            map_tag_insert_error(diesel::result::Error::NotFound),
            CatalogRepositoryError::query("record not found")
        );
    }
}
