//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, [`LoginService`]) are what inbound
//! adapters call. Driven ports (`*Repository`) are what the services need
//! from storage; each exposes a typed error built with `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_command;
mod catalog_query;
mod catalog_repository;
mod login_service;
mod recipe_relation_repository;
mod recipe_relations_command;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod shopping_list_query;
mod subscription_repository;
mod subscriptions_command;
mod subscriptions_query;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use catalog_command::CatalogCommand;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use recipe_relation_repository::MockRecipeRelationRepository;
pub use recipe_relation_repository::{RecipeRelationRepository, RelationRepositoryError};
#[cfg(test)]
pub use recipe_relations_command::MockRecipeRelationsCommand;
pub use recipe_relations_command::RecipeRelationsCommand;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::RecipesCommand;
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::ShoppingListQuery;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
#[cfg(test)]
pub use subscriptions_command::MockSubscriptionsCommand;
pub use subscriptions_command::SubscriptionsCommand;
#[cfg(test)]
pub use subscriptions_query::MockSubscriptionsQuery;
pub use subscriptions_query::SubscriptionsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
#[cfg(test)]
pub use users_query::MockUsersQuery;
