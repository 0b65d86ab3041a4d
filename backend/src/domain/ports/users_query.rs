//! Driving port for reading user cards.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{Error, UserCard, UserId};

/// Read-side user use-cases. Cards carry `isSubscribed` relative to `viewer`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    async fn list_users(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PageSlice<UserCard>, Error>;

    /// Fetch one user or fail with `404`.
    async fn get_user(&self, viewer: Option<UserId>, id: &UserId) -> Result<UserCard, Error>;
}
