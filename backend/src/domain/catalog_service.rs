//! Tag and ingredient services.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{CatalogCommand, CatalogQuery, CatalogRepository, UserRepository};
use super::{Error, Ingredient, IngredientId, NewIngredient, NewTag, Tag, TagId, UserId};

/// Implements [`CatalogQuery`] and [`CatalogCommand`].
#[derive(Clone)]
pub struct CatalogService<C, U> {
    catalog: Arc<C>,
    users: Arc<U>,
}

impl<C, U> CatalogService<C, U> {
    /// Create a new service with the given repositories.
    pub fn new(catalog: Arc<C>, users: Arc<U>) -> Self {
        Self { catalog, users }
    }
}

impl<C, U> CatalogService<C, U>
where
    C: CatalogRepository,
    U: UserRepository,
{
    async fn require_admin(&self, actor: &UserId) -> Result<(), Error> {
        let user = self
            .users
            .find_by_id(actor)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if user.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden("only administrators may edit the catalog"))
        }
    }
}

#[async_trait]
impl<C, U> CatalogQuery for CatalogService<C, U>
where
    C: CatalogRepository,
    U: UserRepository,
{
    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        Ok(self.catalog.list_tags().await?)
    }

    async fn get_tag(&self, id: TagId) -> Result<Tag, Error> {
        self.catalog
            .find_tag(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("tag {id} not found")))
    }

    async fn list_ingredients(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, Error> {
        let prefix = name_prefix
            .map(|prefix| prefix.trim().to_owned())
            .filter(|prefix| !prefix.is_empty());
        Ok(self.catalog.list_ingredients(prefix).await?)
    }

    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error> {
        self.catalog
            .find_ingredient(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("ingredient {id} not found")))
    }
}

#[async_trait]
impl<C, U> CatalogCommand for CatalogService<C, U>
where
    C: CatalogRepository,
    U: UserRepository,
{
    async fn create_tag(&self, actor: &UserId, tag: NewTag) -> Result<Tag, Error> {
        self.require_admin(actor).await?;
        Ok(self.catalog.insert_tag(&tag).await?)
    }

    async fn create_ingredient(
        &self,
        actor: &UserId,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, Error> {
        self.require_admin(actor).await?;
        Ok(self.catalog.insert_ingredient(&ingredient).await?)
    }
}
