//! Recipe aggregate: validated drafts, list filters, and read models.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{CatalogValidationError, IngredientId, Slug, Tag, TagId, Title};
use super::user::{UserCard, UserId};

/// Identifier of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a storage key.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Storage key.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Largest value storable in the integer columns backing counts.
const STORED_MAX: u32 = i32::MAX as u32;

/// Validation failures for recipe drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("cooking time must be at least 1 minute")]
    CookingTimeTooShort,
    #[error("cooking time must be at most {max} minutes")]
    CookingTimeTooLong { max: u32 },
    #[error("ingredient amount must be at least 1")]
    AmountTooSmall,
    #[error("ingredient amount must be at most {max}")]
    AmountTooLarge { max: u32 },
    #[error("a recipe needs at least one ingredient")]
    NoIngredients,
    #[error("ingredient {0} is listed more than once")]
    DuplicateIngredient(IngredientId),
    #[error("tag {0} is listed more than once")]
    DuplicateTag(TagId),
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    #[error(transparent)]
    Catalog(#[from] CatalogValidationError),
}

impl RecipeValidationError {
    /// Name of the offending payload field, for adapter error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::CookingTimeTooShort | Self::CookingTimeTooLong { .. } => "cookingTime",
            Self::AmountTooSmall
            | Self::AmountTooLarge { .. }
            | Self::NoIngredients
            | Self::DuplicateIngredient(_) => "ingredients",
            Self::DuplicateTag(_) => "tags",
            Self::Blank { field } => field,
            Self::Catalog(inner) => inner.field(),
        }
    }
}

/// Minutes needed to cook a recipe. Always at least one.
///
/// # Examples
/// ```
/// use foodgram::domain::CookingTime;
///
/// assert!(CookingTime::new(0).is_err());
/// assert_eq!(CookingTime::new(1).map(|t| t.minutes()), Ok(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CookingTime(u32);

impl CookingTime {
    /// Validate a cooking time in minutes.
    pub fn new(minutes: u32) -> Result<Self, RecipeValidationError> {
        match minutes {
            0 => Err(RecipeValidationError::CookingTimeTooShort),
            m if m > STORED_MAX => Err(RecipeValidationError::CookingTimeTooLong { max: STORED_MAX }),
            m => Ok(Self(m)),
        }
    }

    /// Minutes.
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl From<CookingTime> for u32 {
    fn from(value: CookingTime) -> Self {
        value.0
    }
}

impl TryFrom<u32> for CookingTime {
    type Error = RecipeValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Quantity of one ingredient in a recipe, in the ingredient's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Amount(u32);

impl Amount {
    /// Validate an amount.
    pub fn new(value: u32) -> Result<Self, RecipeValidationError> {
        match value {
            0 => Err(RecipeValidationError::AmountTooSmall),
            v if v > STORED_MAX => Err(RecipeValidationError::AmountTooLarge { max: STORED_MAX }),
            v => Ok(Self(v)),
        }
    }

    /// Raw quantity.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<Amount> for u32 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Amount {
    type Error = RecipeValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One ingredient reference inside a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: IngredientId,
    pub amount: Amount,
}

/// Unvalidated recipe fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraftParts {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: u32,
    pub ingredients: Vec<(i64, u32)>,
    pub tags: Vec<i64>,
}

/// Complete, validated content of a recipe, used for create and full update.
///
/// ## Invariants
/// - at least one ingredient, each listed once with an amount of at least 1;
/// - every tag listed once;
/// - name, image, and text are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    name: Title,
    image: String,
    text: String,
    cooking_time: CookingTime,
    ingredients: Vec<IngredientAmount>,
    tags: Vec<TagId>,
}

impl RecipeDraft {
    /// Validate raw parts, reporting the first problem found.
    pub fn try_from_parts(parts: RecipeDraftParts) -> Result<Self, RecipeValidationError> {
        let RecipeDraftParts {
            name,
            image,
            text,
            cooking_time,
            ingredients,
            tags,
        } = parts;

        let name = Title::new("name", name)?;
        let image = non_blank("image", image)?;
        let text = non_blank("text", text)?;
        let cooking_time = CookingTime::new(cooking_time)?;

        if ingredients.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }
        let mut seen_ingredients = HashSet::with_capacity(ingredients.len());
        let ingredients = ingredients
            .into_iter()
            .map(|(id, amount)| {
                let ingredient_id = IngredientId::new(id);
                if !seen_ingredients.insert(ingredient_id) {
                    return Err(RecipeValidationError::DuplicateIngredient(ingredient_id));
                }
                Ok(IngredientAmount {
                    ingredient_id,
                    amount: Amount::new(amount)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen_tags = HashSet::with_capacity(tags.len());
        let tags = tags
            .into_iter()
            .map(TagId::new)
            .map(|tag| {
                if seen_tags.insert(tag) {
                    Ok(tag)
                } else {
                    Err(RecipeValidationError::DuplicateTag(tag))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            image,
            text,
            cooking_time,
            ingredients,
            tags,
        })
    }

    /// Validated recipe title.
    pub fn name(&self) -> &Title {
        &self.name
    }

    /// Image reference as submitted.
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Preparation instructions.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Minutes to cook, at least one.
    pub fn cooking_time(&self) -> CookingTime {
        self.cooking_time
    }

    /// Ingredient lines in submission order, one per ingredient.
    pub fn ingredients(&self) -> &[IngredientAmount] {
        &self.ingredients
    }

    /// Distinct tag ids in submission order.
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, RecipeValidationError> {
    if value.trim().is_empty() {
        Err(RecipeValidationError::Blank { field })
    } else {
        Ok(value)
    }
}

/// Client-facing list filters, before the viewer is taken into account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    /// Match recipes carrying any of these tags.
    pub tags: Vec<Slug>,
    pub author: Option<UserId>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Storage-level filter with viewer-relative flags resolved to user ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tags: Vec<Slug>,
    pub author: Option<UserId>,
    pub favorited_by: Option<UserId>,
    pub in_cart_of: Option<UserId>,
}

impl RecipeListQuery {
    /// Resolve viewer-relative flags.
    ///
    /// Returns `None` when the query can match nothing, which happens when an
    /// anonymous viewer asks for their favourites or cart.
    pub fn resolve(self, viewer: Option<&UserId>) -> Option<RecipeFilter> {
        let needs_viewer = self.is_favorited || self.is_in_shopping_cart;
        if needs_viewer && viewer.is_none() {
            return None;
        }
        Some(RecipeFilter {
            tags: self.tags,
            author: self.author,
            favorited_by: viewer.filter(|_| self.is_favorited).cloned(),
            in_cart_of: viewer.filter(|_| self.is_in_shopping_cart).cloned(),
        })
    }
}

/// Short recipe projection used by toggles and subscription cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    #[schema(value_type = i64, example = 42)]
    pub id: RecipeId,
    #[schema(example = "Pancakes")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/pancakes.png")]
    pub image: String,
    #[schema(value_type = u32, example = 20)]
    pub cooking_time: CookingTime,
}

/// Ingredient line in a recipe read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientLine {
    #[schema(value_type = i64, example = 7)]
    pub id: IngredientId,
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
    #[schema(value_type = u32, example = 250)]
    pub amount: Amount,
}

/// Stored recipe content without viewer-relative fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub author: UserId,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: CookingTime,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredientLine>,
}

impl RecipeRecord {
    /// Short projection of this recipe.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

/// Full recipe as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    #[schema(value_type = i64, example = 42)]
    pub id: RecipeId,
    pub tags: Vec<Tag>,
    pub author: UserCard,
    pub ingredients: Vec<RecipeIngredientLine>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    #[schema(example = "Pancakes")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/pancakes.png")]
    pub image: String,
    #[schema(example = "Whisk, rest, fry.")]
    pub text: String,
    #[schema(value_type = u32, example = 20)]
    pub cooking_time: CookingTime,
}

/// Viewer-relative state of one recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeView {
    /// Combine a stored recipe with its author's card and the viewer's flags.
    pub fn assemble(record: RecipeRecord, author: UserCard, flags: ViewerFlags) -> Self {
        let RecipeRecord {
            id,
            author: _,
            name,
            image,
            text,
            cooking_time,
            tags,
            ingredients,
        } = record;
        Self {
            id,
            tags,
            author,
            ingredients,
            is_favorited: flags.is_favorited,
            is_in_shopping_cart: flags.is_in_shopping_cart,
            name,
            image,
            text,
            cooking_time,
        }
    }
}

#[cfg(test)]
mod tests;
