//! Choose the storage backend behind the HTTP ports.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use foodgram::domain::RecipeRepositories;
use foodgram::inbound::http::state::HttpState;
use foodgram::outbound::memory::InMemoryStore;
use foodgram::outbound::persistence::{
    DbPool, DieselCatalogRepository, DieselRecipeRepository, DieselRelationRepository,
    DieselSubscriptionRepository, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_repositories(
    pool: &DbPool,
) -> RecipeRepositories<
    DieselRecipeRepository,
    DieselCatalogRepository,
    DieselUserRepository,
    DieselRelationRepository,
    DieselSubscriptionRepository,
> {
    RecipeRepositories {
        recipes: Arc::new(DieselRecipeRepository::new(pool.clone())),
        catalog: Arc::new(DieselCatalogRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        relations: Arc::new(DieselRelationRepository::new(pool.clone())),
        subscriptions: Arc::new(DieselSubscriptionRepository::new(pool.clone())),
    }
}

/// One store serves every repository port so cross-table rules hold.
fn memory_repositories(
    store: Arc<InMemoryStore>,
) -> RecipeRepositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore>
{
    RecipeRepositories {
        recipes: Arc::clone(&store),
        catalog: Arc::clone(&store),
        users: Arc::clone(&store),
        relations: Arc::clone(&store),
        subscriptions: store,
    }
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            HttpState::from_repositories(diesel_repositories(pool), config.recipes_limit)
        }
        None => {
            warn!("no database configured; data lives in memory and is lost on restart");
            HttpState::from_repositories(
                memory_repositories(Arc::new(InMemoryStore::default())),
                config.recipes_limit,
            )
        }
    };
    web::Data::new(state)
}
