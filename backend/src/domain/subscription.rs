//! Author cards returned by the subscription endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{RecipeSummary, UserCard};

/// Default number of recipes embedded in a subscription card.
pub const DEFAULT_RECIPES_LIMIT: u32 = 3;

/// A followed author with a preview of their latest recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCard {
    #[serde(flatten)]
    pub author: UserCard,
    /// Newest recipes first, capped by `recipes_limit`.
    pub recipes: Vec<RecipeSummary>,
    /// Total number of recipes the author has published.
    pub recipes_count: u64,
}
