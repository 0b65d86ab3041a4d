//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only see driving
//! ports, so they can be exercised against mocks without any storage.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogCommand, CatalogQuery, CatalogRepository, LoginService, RecipeRelationRepository,
    RecipeRelationsCommand, RecipeRepository, RecipesCommand, RecipesQuery, ShoppingListQuery,
    SubscriptionRepository, SubscriptionsCommand, SubscriptionsQuery, UserRepository, UsersQuery,
};
use crate::domain::{
    AccountService, CatalogService, RecipeRelationsService, RecipeRepositories, RecipeService,
    SubscriptionService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub catalog_admin: Arc<dyn CatalogCommand>,
    pub recipes: Arc<dyn RecipesQuery>,
    pub recipe_authoring: Arc<dyn RecipesCommand>,
    pub relations: Arc<dyn RecipeRelationsCommand>,
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    pub subscriptions: Arc<dyn SubscriptionsQuery>,
    pub subscription_commands: Arc<dyn SubscriptionsCommand>,
}

impl HttpState {
    /// Wire every driving port to the domain services over one set of
    /// repositories.
    ///
    /// `default_recipes_limit` is the number of recipe previews embedded in
    /// subscription cards when a request omits `recipes_limit`.
    pub fn from_repositories<R, C, U, L, S>(
        repos: RecipeRepositories<R, C, U, L, S>,
        default_recipes_limit: u32,
    ) -> Self
    where
        R: RecipeRepository + 'static,
        C: CatalogRepository + 'static,
        U: UserRepository + 'static,
        L: RecipeRelationRepository + 'static,
        S: SubscriptionRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.subscriptions),
        ));
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&repos.catalog),
            Arc::clone(&repos.users),
        ));
        let relations = Arc::new(RecipeRelationsService::new(
            Arc::clone(&repos.recipes),
            Arc::clone(&repos.relations),
        ));
        let subscriptions = Arc::new(
            SubscriptionService::new(
                Arc::clone(&repos.users),
                Arc::clone(&repos.subscriptions),
                Arc::clone(&repos.recipes),
            )
            .with_default_recipes_limit(default_recipes_limit),
        );
        let recipes = Arc::new(RecipeService::new(repos));

        Self {
            login: accounts.clone(),
            users: accounts,
            catalog: catalog.clone(),
            catalog_admin: catalog,
            recipes: recipes.clone(),
            recipe_authoring: recipes,
            relations: relations.clone(),
            shopping_list: relations,
            subscriptions: subscriptions.clone(),
            subscription_commands: subscriptions,
        }
    }
}
