//! Driving port for listing followed authors.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{Error, SubscriptionCard, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsQuery: Send + Sync {
    async fn subscriptions(
        &self,
        user: &UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<PageSlice<SubscriptionCard>, Error>;
}
