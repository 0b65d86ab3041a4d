//! Recipe authoring and browsing services.
//!
//! Mutations check that every referenced tag and ingredient exists before
//! writing, then re-read the stored recipe so responses always reflect what
//! was persisted.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};
use serde_json::json;
use tracing::info;

use super::ports::{
    CatalogRepository, RecipeRelationRepository, RecipeRepository, RecipesCommand, RecipesQuery,
    SubscriptionRepository, UserRepository,
};
use super::views::recipe_views;
use super::{Error, RecipeDraft, RecipeId, RecipeListQuery, RecipeRecord, RecipeView, UserId};

/// Repositories a [`RecipeService`] reads from and writes to.
pub struct RecipeRepositories<R, C, U, L, S> {
    pub recipes: Arc<R>,
    pub catalog: Arc<C>,
    pub users: Arc<U>,
    pub relations: Arc<L>,
    pub subscriptions: Arc<S>,
}

impl<R, C, U, L, S> Clone for RecipeRepositories<R, C, U, L, S> {
    fn clone(&self) -> Self {
        Self {
            recipes: Arc::clone(&self.recipes),
            catalog: Arc::clone(&self.catalog),
            users: Arc::clone(&self.users),
            relations: Arc::clone(&self.relations),
            subscriptions: Arc::clone(&self.subscriptions),
        }
    }
}

/// Implements [`RecipesQuery`] and [`RecipesCommand`].
#[derive(Clone)]
pub struct RecipeService<R, C, U, L, S> {
    repos: RecipeRepositories<R, C, U, L, S>,
}

impl<R, C, U, L, S> RecipeService<R, C, U, L, S> {
    /// Create a new service over the given repositories.
    pub fn new(repos: RecipeRepositories<R, C, U, L, S>) -> Self {
        Self { repos }
    }
}

impl<R, C, U, L, S> RecipeService<R, C, U, L, S>
where
    R: RecipeRepository,
    C: CatalogRepository,
    U: UserRepository,
    L: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    async fn find_record(&self, id: RecipeId) -> Result<RecipeRecord, Error> {
        self.repos
            .recipes
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("recipe {id} not found")))
    }

    async fn view(&self, viewer: Option<&UserId>, record: RecipeRecord) -> Result<RecipeView, Error> {
        let mut views = recipe_views(
            self.repos.users.as_ref(),
            self.repos.relations.as_ref(),
            self.repos.subscriptions.as_ref(),
            viewer,
            vec![record],
        )
        .await?;
        views
            .pop()
            .ok_or_else(|| Error::internal("recipe view assembly produced no view"))
    }

    /// Fail with `403` unless `actor` wrote the recipe or is an admin.
    async fn ensure_can_modify(&self, actor: &UserId, record: &RecipeRecord) -> Result<(), Error> {
        if &record.author == actor {
            return Ok(());
        }
        let user = self
            .repos
            .users
            .find_by_id(actor)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if user.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden(
                "only the author or an administrator may change this recipe",
            ))
        }
    }

    async fn ensure_references_exist(&self, draft: &RecipeDraft) -> Result<(), Error> {
        let ingredient_ids: Vec<_> = draft
            .ingredients()
            .iter()
            .map(|line| line.ingredient_id)
            .collect();
        let missing = self
            .repos
            .catalog
            .missing_ingredients(&ingredient_ids)
            .await?;
        if !missing.is_empty() {
            let ids: Vec<i64> = missing.iter().map(|id| id.get()).collect();
            return Err(
                Error::invalid_request("recipe references unknown ingredients").with_details(
                    json!({ "field": "ingredients", "code": "unknown_ingredient", "ids": ids }),
                ),
            );
        }

        let missing = self.repos.catalog.missing_tags(draft.tags()).await?;
        if !missing.is_empty() {
            let ids: Vec<i64> = missing.iter().map(|id| id.get()).collect();
            return Err(Error::invalid_request("recipe references unknown tags").with_details(
                json!({ "field": "tags", "code": "unknown_tag", "ids": ids }),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, C, U, L, S> RecipesQuery for RecipeService<R, C, U, L, S>
where
    R: RecipeRepository,
    C: CatalogRepository,
    U: UserRepository,
    L: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    async fn list_recipes(
        &self,
        viewer: Option<UserId>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeView>, Error> {
        let Some(filter) = query.resolve(viewer.as_ref()) else {
            return Ok(PageSlice::empty());
        };
        let slice = self.repos.recipes.list(&filter, page).await?;
        let views = recipe_views(
            self.repos.users.as_ref(),
            self.repos.relations.as_ref(),
            self.repos.subscriptions.as_ref(),
            viewer.as_ref(),
            slice.items,
        )
        .await?;
        Ok(PageSlice::new(views, slice.total))
    }

    async fn get_recipe(&self, viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error> {
        let record = self.find_record(id).await?;
        self.view(viewer.as_ref(), record).await
    }
}

#[async_trait]
impl<R, C, U, L, S> RecipesCommand for RecipeService<R, C, U, L, S>
where
    R: RecipeRepository,
    C: CatalogRepository,
    U: UserRepository,
    L: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    async fn create_recipe(&self, actor: &UserId, draft: RecipeDraft) -> Result<RecipeView, Error> {
        if self.repos.users.find_by_id(actor).await?.is_none() {
            return Err(Error::unauthorized("login required"));
        }
        self.ensure_references_exist(&draft).await?;
        let id = self.repos.recipes.insert(actor, &draft).await?;
        info!(recipe_id = %id, author = %actor, "recipe created");
        let record = self.find_record(id).await?;
        self.view(Some(actor), record).await
    }

    async fn update_recipe(
        &self,
        actor: &UserId,
        id: RecipeId,
        draft: RecipeDraft,
    ) -> Result<RecipeView, Error> {
        let record = self.find_record(id).await?;
        self.ensure_can_modify(actor, &record).await?;
        self.ensure_references_exist(&draft).await?;
        if !self.repos.recipes.replace(id, &draft).await? {
            return Err(Error::not_found(format!("recipe {id} not found")));
        }
        info!(recipe_id = %id, actor = %actor, "recipe updated");
        let record = self.find_record(id).await?;
        self.view(Some(actor), record).await
    }

    async fn delete_recipe(&self, actor: &UserId, id: RecipeId) -> Result<(), Error> {
        let record = self.find_record(id).await?;
        self.ensure_can_modify(actor, &record).await?;
        if !self.repos.recipes.delete(id).await? {
            return Err(Error::not_found(format!("recipe {id} not found")));
        }
        info!(recipe_id = %id, actor = %actor, "recipe deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
