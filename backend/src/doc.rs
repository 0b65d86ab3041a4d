//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI at `/docs` in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, Ingredient, RecipeIngredientLine, RecipeSummary, RecipeView,
    SubscriptionCard, Tag, UserCard,
};
use crate::inbound::http::catalog::{IngredientRequest, TagRequest};
use crate::inbound::http::recipes::{IngredientAmountRequest, RecipeRequest};
use crate::inbound::http::schemas::{RecipePage, SubscriptionPage, UserPage};
use crate::inbound::http::users::LoginRequest;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Foodgram API",
        description = "Recipes, tags, ingredients, favourites, shopping cart, and author subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::list_subscriptions,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::subscribe,
        crate::inbound::http::users::unsubscribe,
        crate::inbound::http::catalog::list_tags,
        crate::inbound::http::catalog::get_tag,
        crate::inbound::http::catalog::create_tag,
        crate::inbound::http::catalog::list_ingredients,
        crate::inbound::http::catalog::get_ingredient,
        crate::inbound::http::catalog::create_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::download_shopping_cart,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::relations::add_favorite,
        crate::inbound::http::relations::remove_favorite,
        crate::inbound::http::relations::add_to_cart,
        crate::inbound::http::relations::remove_from_cart,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserCard,
        Tag,
        Ingredient,
        RecipeView,
        RecipeSummary,
        RecipeIngredientLine,
        SubscriptionCard,
        UserPage,
        RecipePage,
        SubscriptionPage,
        LoginRequest,
        TagRequest,
        IngredientRequest,
        RecipeRequest,
        IngredientAmountRequest,
    )),
    tags(
        (name = "users", description = "Login, user directory, and subscriptions"),
        (name = "catalog", description = "Tags and ingredients"),
        (name = "recipes", description = "Recipes, favourites, and the shopping cart"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
