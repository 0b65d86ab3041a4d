//! User-to-recipe relations: favourites and the shopping cart.

use std::collections::HashSet;
use std::fmt;

use super::RecipeId;

/// Which per-user recipe list a relation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Favorite,
    ShoppingCart,
}

impl RelationKind {
    /// Message returned when adding a recipe that is already present.
    pub fn duplicate_message(self) -> &'static str {
        match self {
            Self::Favorite => "recipe is already in favourites",
            Self::ShoppingCart => "recipe is already in the shopping cart",
        }
    }

    /// Message returned when removing a recipe that is not present.
    pub fn missing_message(self) -> &'static str {
        match self {
            Self::Favorite => "recipe is not in favourites",
            Self::ShoppingCart => "recipe is not in the shopping cart",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shopping_cart",
        })
    }
}

/// Which of a set of recipes a viewer has favourited or carted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeMemberships {
    pub favorites: HashSet<RecipeId>,
    pub cart: HashSet<RecipeId>,
}

impl RecipeMemberships {
    pub fn is_favorited(&self, recipe: RecipeId) -> bool {
        self.favorites.contains(&recipe)
    }

    pub fn is_in_cart(&self, recipe: RecipeId) -> bool {
        self.cart.contains(&recipe)
    }
}
