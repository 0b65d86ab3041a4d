//! Following authors and listing followed authors with recipe previews.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};
use tracing::info;

use super::ports::{
    RecipeRepository, SubscriptionRepository, SubscriptionsCommand, SubscriptionsQuery,
    UserRepository,
};
use super::{DEFAULT_RECIPES_LIMIT, Error, SubscriptionCard, User, UserCard, UserId};

/// Implements [`SubscriptionsCommand`] and [`SubscriptionsQuery`].
#[derive(Clone)]
pub struct SubscriptionService<U, S, R> {
    users: Arc<U>,
    subscriptions: Arc<S>,
    recipes: Arc<R>,
    default_recipes_limit: u32,
}

impl<U, S, R> SubscriptionService<U, S, R> {
    /// Create a service embedding [`DEFAULT_RECIPES_LIMIT`] recipes per card
    /// unless the caller asks otherwise.
    pub fn new(users: Arc<U>, subscriptions: Arc<S>, recipes: Arc<R>) -> Self {
        Self {
            users,
            subscriptions,
            recipes,
            default_recipes_limit: DEFAULT_RECIPES_LIMIT,
        }
    }

    /// Override the number of recipes embedded when the caller omits
    /// `recipes_limit`.
    #[must_use]
    pub fn with_default_recipes_limit(mut self, limit: u32) -> Self {
        self.default_recipes_limit = limit;
        self
    }
}

impl<U, S, R> SubscriptionService<U, S, R>
where
    U: UserRepository,
    R: RecipeRepository,
{
    async fn existing_author(&self, author: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(author)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {author} not found")))
    }

    /// Card for an author the viewer follows.
    async fn card(&self, author: &User, recipes_limit: Option<u32>) -> Result<SubscriptionCard, Error> {
        let limit = recipes_limit.unwrap_or(self.default_recipes_limit);
        let recipes = if limit == 0 {
            Vec::new()
        } else {
            self.recipes.summaries_by_author(author.id(), limit).await?
        };
        let recipes_count = self.recipes.count_by_author(author.id()).await?;
        Ok(SubscriptionCard {
            author: UserCard::new(author, true),
            recipes,
            recipes_count,
        })
    }
}

fn reject_self(user: &UserId, author: &UserId) -> Result<(), Error> {
    if user == author {
        Err(Error::invalid_request("cannot subscribe to yourself"))
    } else {
        Ok(())
    }
}

#[async_trait]
impl<U, S, R> SubscriptionsCommand for SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    async fn subscribe(
        &self,
        user: &UserId,
        author: &UserId,
        recipes_limit: Option<u32>,
    ) -> Result<SubscriptionCard, Error> {
        reject_self(user, author)?;
        let author = self.existing_author(author).await?;
        if !self.subscriptions.add(user, author.id()).await? {
            return Err(Error::invalid_request("already subscribed to this author"));
        }
        info!(follower = %user, author = %author.id(), "subscribed");
        self.card(&author, recipes_limit).await
    }

    async fn unsubscribe(&self, user: &UserId, author: &UserId) -> Result<(), Error> {
        reject_self(user, author)?;
        self.existing_author(author).await?;
        if !self.subscriptions.remove(user, author).await? {
            return Err(Error::invalid_request("not subscribed to this author"));
        }
        info!(follower = %user, author = %author, "unsubscribed");
        Ok(())
    }
}

#[async_trait]
impl<U, S, R> SubscriptionsQuery for SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    async fn subscriptions(
        &self,
        user: &UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<PageSlice<SubscriptionCard>, Error> {
        let slice = self.subscriptions.authors(user, page).await?;
        let mut cards = Vec::with_capacity(slice.items.len());
        for author in &slice.items {
            cards.push(self.card(author, recipes_limit).await?);
        }
        Ok(PageSlice::new(cards, slice.total))
    }
}
