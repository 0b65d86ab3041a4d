//! Login and user directory services.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};
use tracing::debug;

use super::ports::{LoginService, SubscriptionRepository, UserRepository, UsersQuery};
use super::views::user_cards;
use super::{Error, LoginCredentials, UserCard, UserId, verify_password};

/// Implements [`LoginService`] and [`UsersQuery`] over the user and
/// subscription repositories.
#[derive(Clone)]
pub struct AccountService<U, S> {
    users: Arc<U>,
    subscriptions: Arc<S>,
}

impl<U, S> AccountService<U, S> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, subscriptions: Arc<S>) -> Self {
        Self {
            users,
            subscriptions,
        }
    }
}

#[async_trait]
impl<U, S> LoginService for AccountService<U, S>
where
    U: UserRepository,
    S: SubscriptionRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self.users.find_credentials(credentials.email()).await?;
        match stored {
            Some(stored)
                if verify_password(
                    &stored.user_id,
                    credentials.password(),
                    &stored.password_digest,
                ) =>
            {
                Ok(stored.user_id)
            }
            _ => {
                debug!("login rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

#[async_trait]
impl<U, S> UsersQuery for AccountService<U, S>
where
    U: UserRepository,
    S: SubscriptionRepository,
{
    async fn list_users(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PageSlice<UserCard>, Error> {
        let slice = self.users.list(page).await?;
        let cards = user_cards(self.subscriptions.as_ref(), viewer.as_ref(), slice.items).await?;
        Ok(PageSlice::new(cards, slice.total))
    }

    async fn get_user(&self, viewer: Option<UserId>, id: &UserId) -> Result<UserCard, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        let mut cards = user_cards(self.subscriptions.as_ref(), viewer.as_ref(), vec![user]).await?;
        cards
            .pop()
            .ok_or_else(|| Error::internal("user card assembly produced no card"))
    }
}
