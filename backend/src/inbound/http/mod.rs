//! HTTP inbound adapter exposing the REST API under `/api/v1`.

pub mod catalog;
pub mod error;
pub mod health;
pub mod paging;
pub mod recipes;
pub mod relations;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every API handler on `cfg`.
///
/// Literal segments (`/users/me`, `/users/subscriptions`,
/// `/recipes/download_shopping_cart`) are registered ahead of the `{id}`
/// routes they would otherwise be captured by.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::list_subscriptions)
        .service(users::get_user)
        .service(users::subscribe)
        .service(users::unsubscribe)
        .service(catalog::list_tags)
        .service(catalog::create_tag)
        .service(catalog::get_tag)
        .service(catalog::list_ingredients)
        .service(catalog::create_ingredient)
        .service(catalog::get_ingredient)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::download_shopping_cart)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(relations::add_favorite)
        .service(relations::remove_favorite)
        .service(relations::add_to_cart)
        .service(relations::remove_from_cart);
}
