//! Catalog entities shared by every recipe: tags and ingredients.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of names, units, and slugs.
pub const TITLE_MAX: usize = 200;

/// Validation failures for catalog values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("color must be a hex code such as #A1B2C3")]
    InvalidColor,
    #[error("slug may only contain letters, digits, hyphens, and underscores")]
    InvalidSlug,
}

impl CatalogValidationError {
    /// Name of the offending field, for adapter error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } => field,
            Self::InvalidColor => "color",
            Self::InvalidSlug => "slug",
        }
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a storage key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Storage key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

catalog_id! {
    /// Identifier of a [`Tag`].
    TagId
}

catalog_id! {
    /// Identifier of an [`Ingredient`].
    IngredientId
}

/// Non-blank text of at most [`TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Validate `value`, naming `field` in any error.
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::Blank { field });
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(CatalogValidationError::TooLong {
                field,
                max: TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

impl TryFrom<String> for Title {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new("title", value)
    }
}

static COLOR_RE: OnceLock<Regex> = OnceLock::new();
static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn color_regex() -> &'static Regex {
    COLOR_RE.get_or_init(|| {
        Regex::new("^#[a-fA-F0-9]{6}$")
            .unwrap_or_else(|error| panic!("color regex failed to compile: {error}"))
    })
}

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        Regex::new("^[-a-zA-Z0-9_]+$")
            .unwrap_or_else(|error| panic!("slug regex failed to compile: {error}"))
    })
}

/// Tag colour in `#RRGGBB` form, stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Validate a colour code.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let value = value.into();
        if !color_regex().is_match(&value) {
            return Err(CatalogValidationError::InvalidColor);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// URL-safe unique tag key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate a slug.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogValidationError> {
        let value = value.into();
        if value.chars().count() > TITLE_MAX {
            return Err(CatalogValidationError::TooLong {
                field: "slug",
                max: TITLE_MAX,
            });
        }
        if !slug_regex().is_match(&value) {
            return Err(CatalogValidationError::InvalidSlug);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Recipe label such as "Breakfast".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    #[schema(value_type = i64, example = 1)]
    pub id: TagId,
    #[schema(value_type = String, example = "Breakfast")]
    pub name: Title,
    #[schema(value_type = String, example = "#E26C2D")]
    pub color: HexColor,
    #[schema(value_type = String, example = "breakfast")]
    pub slug: Slug,
}

/// Validated input for creating a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: Title,
    pub color: HexColor,
    pub slug: Slug,
}

impl NewTag {
    /// Validate raw tag fields.
    pub fn try_from_parts(
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            name: Title::new("name", name)?,
            color: HexColor::new(color)?,
            slug: Slug::new(slug)?,
        })
    }
}

/// Something a recipe needs, with the unit it is measured in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[schema(value_type = i64, example = 7)]
    pub id: IngredientId,
    #[schema(value_type = String, example = "flour")]
    pub name: Title,
    #[schema(value_type = String, example = "g")]
    pub measurement_unit: Title,
}

/// Validated input for creating an ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: Title,
    pub measurement_unit: Title,
}

impl NewIngredient {
    /// Validate raw ingredient fields.
    pub fn try_from_parts(name: &str, measurement_unit: &str) -> Result<Self, CatalogValidationError> {
        Ok(Self {
            name: Title::new("name", name)?,
            measurement_unit: Title::new("measurementUnit", measurement_unit)?,
        })
    }
}
