//! PostgreSQL-backed subscription adapter.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{User, UserId};

use super::diesel_helpers::{
    collect_rows, is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
    total_from_db,
};
use super::models::{NewSubscriptionRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{subscriptions, users};

/// Diesel-backed implementation of the subscription repository port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubscriptionRepositoryError {
    map_basic_pool_error(error, SubscriptionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
    map_basic_diesel_error(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn add(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The self-follow CHECK constraint surfaces as a generic query error.
        let inserted = diesel::insert_into(subscriptions::table)
            .values(NewSubscriptionRow {
                user_id: *follower.as_uuid(),
                author_id: *author.as_uuid(),
            })
            .on_conflict((subscriptions::user_id, subscriptions::author_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    SubscriptionRepositoryError::query("follower or author does not exist")
                } else {
                    map_diesel_error(error)
                }
            })?;
        Ok(inserted == 1)
    }

    async fn remove(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            subscriptions::table
                .filter(subscriptions::user_id.eq(*follower.as_uuid()))
                .filter(subscriptions::author_id.eq(*author.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, SubscriptionRepositoryError> {
        if authors.is_empty() {
            return Ok(HashSet::new());
        }
        let uuids: Vec<_> = authors.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let followed: Vec<uuid::Uuid> = subscriptions::table
            .filter(subscriptions::user_id.eq(*follower.as_uuid()))
            .filter(subscriptions::author_id.eq_any(uuids))
            .select(subscriptions::author_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(followed.into_iter().map(UserId::from_uuid).collect())
    }

    async fn authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<PageSlice<User>, SubscriptionRepositoryError> {
        let follower_id = *follower.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = subscriptions::table
            .filter(subscriptions::user_id.eq(follower_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<UserRow> = subscriptions::table
            .inner_join(users::table.on(users::id.eq(subscriptions::author_id)))
            .filter(subscriptions::user_id.eq(follower_id))
            .order_by(users::username.asc())
            .select(UserRow::as_select())
            .limit(i64::from(page.limit()))
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let authors = collect_rows(rows.into_iter().map(UserRow::into_domain), |message| {
            SubscriptionRepositoryError::query(format!("invalid user row: {message}"))
        })?;
        Ok(PageSlice::new(authors, total_from_db(total)))
    }
}
