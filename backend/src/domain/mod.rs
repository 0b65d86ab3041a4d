//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, plus the services that implement the driving ports
//! in [`ports`]. Types validate on construction so adapters never hold an
//! invalid value; each type documents its serialisation contract.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`UserCard`]: accounts and their public projection.
//! - [`Tag`], [`Ingredient`]: the admin-managed catalog.
//! - [`RecipeDraft`], [`RecipeView`]: recipe input and read model.
//! - [`ShoppingList`]: cart ingredients summed per name and unit.
//! - [`SubscriptionCard`]: a followed author with recipe previews.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod ports;
pub mod recipe;
pub mod relation;
pub mod shopping_list;
pub mod subscription;
pub mod trace_id;
pub mod user;

mod account_service;
mod catalog_service;
mod port_errors;
mod recipe_service;
mod relations_service;
mod subscription_service;
mod views;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, password_digest, verify_password};
pub use self::catalog::{
    CatalogValidationError, HexColor, Ingredient, IngredientId, NewIngredient, NewTag, Slug, Tag,
    TagId, Title,
};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::recipe::{
    Amount, CookingTime, IngredientAmount, RecipeDraft, RecipeDraftParts, RecipeFilter, RecipeId,
    RecipeIngredientLine, RecipeListQuery, RecipeRecord, RecipeSummary, RecipeValidationError,
    RecipeView, ViewerFlags,
};
pub use self::recipe_service::{RecipeRepositories, RecipeService};
pub use self::relation::{RecipeMemberships, RelationKind};
pub use self::relations_service::RecipeRelationsService;
pub use self::shopping_list::{CartIngredientRow, ShoppingList, ShoppingListLine};
pub use self::subscription::{DEFAULT_RECIPES_LIMIT, SubscriptionCard};
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, PersonName, User, UserCard, UserId, UserRole, UserValidationError, Username,
};
