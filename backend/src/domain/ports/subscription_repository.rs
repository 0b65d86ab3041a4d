//! Port for author subscriptions.
use std::collections::HashSet;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscription repository adapters.
    pub enum SubscriptionRepositoryError("subscription repository") {}
}

/// Follower-to-author pairs. A user never follows themselves; adapters back
/// this with a storage constraint as well.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Atomically insert the pair unless it exists. Returns `true` when a row
    /// was inserted.
    async fn add(&self, follower: &UserId, author: &UserId)
    -> Result<bool, SubscriptionRepositoryError>;

    /// Delete the pair. Returns `true` when a row was deleted.
    async fn remove(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError>;

    /// Which of `authors` the follower is subscribed to.
    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, SubscriptionRepositoryError>;

    /// Page through the authors a user follows, ordered by username.
    async fn authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<PageSlice<User>, SubscriptionRepositoryError>;
}
