//! Assembly of viewer-relative read models.
//!
//! Repositories return stored data only. These helpers batch the lookups that
//! depend on who is asking (favourites, cart, subscriptions) so a page of
//! results costs a fixed number of queries.

use std::collections::{HashMap, HashSet};

use super::ports::{RecipeRelationRepository, SubscriptionRepository, UserRepository};
use super::{Error, RecipeMemberships, RecipeRecord, RecipeView, User, UserCard, UserId, ViewerFlags};

/// Project users into cards, marking those the viewer follows.
pub(crate) async fn user_cards<S>(
    subscriptions: &S,
    viewer: Option<&UserId>,
    users: Vec<User>,
) -> Result<Vec<UserCard>, Error>
where
    S: SubscriptionRepository + ?Sized,
{
    let followed = match viewer {
        Some(viewer) if !users.is_empty() => {
            let ids: Vec<UserId> = users.iter().map(|user| user.id().clone()).collect();
            subscriptions.followed_among(viewer, &ids).await?
        }
        _ => HashSet::new(),
    };
    Ok(users
        .iter()
        .map(|user| UserCard::new(user, followed.contains(user.id())))
        .collect())
}

/// Expand stored recipes into full views for `viewer`.
pub(crate) async fn recipe_views<U, L, S>(
    users: &U,
    relations: &L,
    subscriptions: &S,
    viewer: Option<&UserId>,
    records: Vec<RecipeRecord>,
) -> Result<Vec<RecipeView>, Error>
where
    U: UserRepository + ?Sized,
    L: RecipeRelationRepository + ?Sized,
    S: SubscriptionRepository + ?Sized,
{
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut author_ids: Vec<UserId> = Vec::new();
    for record in &records {
        if !author_ids.contains(&record.author) {
            author_ids.push(record.author.clone());
        }
    }
    let authors = users.find_many(&author_ids).await?;
    let cards: HashMap<UserId, UserCard> = user_cards(subscriptions, viewer, authors)
        .await?
        .into_iter()
        .map(|card| (card.id.clone(), card))
        .collect();

    let memberships = match viewer {
        Some(viewer) => {
            let recipe_ids: Vec<_> = records.iter().map(|record| record.id).collect();
            relations.memberships(viewer, &recipe_ids).await?
        }
        None => RecipeMemberships::default(),
    };

    records
        .into_iter()
        .map(|record| {
            let author = cards.get(&record.author).cloned().ok_or_else(|| {
                Error::internal(format!("author {} of recipe {} is missing", record.author, record.id))
            })?;
            let flags = ViewerFlags {
                is_favorited: memberships.is_favorited(record.id),
                is_in_shopping_cart: memberships.is_in_cart(record.id),
            };
            Ok(RecipeView::assemble(record, author, flags))
        })
        .collect()
}
