//! Driving port for following and unfollowing authors.

use async_trait::async_trait;

use crate::domain::{Error, SubscriptionCard, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsCommand: Send + Sync {
    /// Follow `author`. Self-subscription and repeated subscription fail with
    /// `400`; an unknown author fails with `404`.
    async fn subscribe(
        &self,
        user: &UserId,
        author: &UserId,
        recipes_limit: Option<u32>,
    ) -> Result<SubscriptionCard, Error>;

    /// Stop following `author`. Fails with `400` when not subscribed.
    async fn unsubscribe(&self, user: &UserId, author: &UserId) -> Result<(), Error>;
}
