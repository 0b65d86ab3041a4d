//! Process-local adapter implementing every repository port.
//!
//! `InMemoryStore` keeps users, the catalog, recipes, and user relations
//! behind one mutex so multi-table rules (cascading recipe deletes, unique
//! pairs, ordering) hold exactly as they do in PostgreSQL. The server uses it
//! when no database is configured; HTTP integration tests use it to run
//! complete flows.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{
    CatalogRepository, CatalogRepositoryError, RecipeRelationRepository, RecipeRepository,
    RecipeRepositoryError, RelationRepositoryError, StoredCredentials, SubscriptionRepository,
    SubscriptionRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CartIngredientRow, CookingTime, Email, Ingredient, IngredientAmount, IngredientId,
    NewIngredient, NewTag, RecipeDraft, RecipeFilter, RecipeId, RecipeIngredientLine,
    RecipeMemberships, RecipeRecord, RecipeSummary, RelationKind, Tag, TagId, User, UserId,
    password_digest,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_digest: String,
}

#[derive(Debug, Clone)]
struct StoredRecipe {
    author: UserId,
    name: String,
    image: String,
    text: String,
    cooking_time: CookingTime,
    ingredients: Vec<IngredientAmount>,
    tags: Vec<TagId>,
}

impl StoredRecipe {
    fn from_draft(author: UserId, draft: &RecipeDraft) -> Self {
        Self {
            author,
            name: draft.name().as_ref().to_owned(),
            image: draft.image().to_owned(),
            text: draft.text().to_owned(),
            cooking_time: draft.cooking_time(),
            ingredients: draft.ingredients().to_vec(),
            tags: draft.tags().to_vec(),
        }
    }

    fn summary(&self, id: RecipeId) -> RecipeSummary {
        RecipeSummary {
            id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredUser>,
    tags: BTreeMap<i64, Tag>,
    ingredients: BTreeMap<i64, Ingredient>,
    recipes: BTreeMap<i64, StoredRecipe>,
    // Insertion order doubles as storage order for cart aggregation.
    favorites: Vec<(UserId, RecipeId)>,
    cart: Vec<(UserId, RecipeId)>,
    subscriptions: HashSet<(UserId, UserId)>,
    last_tag_id: i64,
    last_ingredient_id: i64,
    last_recipe_id: i64,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users
            .iter()
            .map(|stored| &stored.user)
            .find(|user| user.id() == id)
    }

    fn users_by_username<'a>(&'a self, keep: impl Fn(&User) -> bool) -> Vec<&'a User> {
        let mut users: Vec<&User> = self
            .users
            .iter()
            .map(|stored| &stored.user)
            .filter(|user| keep(user))
            .collect();
        users.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        users
    }

    fn relation(&self, kind: RelationKind) -> &Vec<(UserId, RecipeId)> {
        match kind {
            RelationKind::Favorite => &self.favorites,
            RelationKind::ShoppingCart => &self.cart,
        }
    }

    fn relation_mut(&mut self, kind: RelationKind) -> &mut Vec<(UserId, RecipeId)> {
        match kind {
            RelationKind::Favorite => &mut self.favorites,
            RelationKind::ShoppingCart => &mut self.cart,
        }
    }

    fn record(&self, id: i64, recipe: &StoredRecipe) -> Result<RecipeRecord, RecipeRepositoryError> {
        let mut tags: Vec<Tag> = recipe
            .tags
            .iter()
            .map(|tag| {
                self.tags.get(&tag.get()).cloned().ok_or_else(|| {
                    RecipeRepositoryError::query(format!("recipe {id} references lost tag {tag}"))
                })
            })
            .collect::<Result<_, _>>()?;
        tags.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));

        let ingredients = recipe
            .ingredients
            .iter()
            .map(|line| {
                let ingredient = self
                    .ingredients
                    .get(&line.ingredient_id.get())
                    .ok_or_else(|| {
                        RecipeRepositoryError::query(format!(
                            "recipe {id} references lost ingredient {}",
                            line.ingredient_id
                        ))
                    })?;
                Ok(RecipeIngredientLine {
                    id: ingredient.id,
                    name: ingredient.name.as_ref().to_owned(),
                    measurement_unit: ingredient.measurement_unit.as_ref().to_owned(),
                    amount: line.amount,
                })
            })
            .collect::<Result<_, RecipeRepositoryError>>()?;

        Ok(RecipeRecord {
            id: RecipeId::new(id),
            author: recipe.author.clone(),
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
            tags,
            ingredients,
        })
    }

    fn check_references(&self, draft: &RecipeDraft) -> Result<(), RecipeRepositoryError> {
        if let Some(line) = draft
            .ingredients()
            .iter()
            .find(|line| !self.ingredients.contains_key(&line.ingredient_id.get()))
        {
            return Err(RecipeRepositoryError::missing_reference(format!(
                "ingredient {} does not exist",
                line.ingredient_id
            )));
        }
        if let Some(tag) = draft
            .tags()
            .iter()
            .find(|tag| !self.tags.contains_key(&tag.get()))
        {
            return Err(RecipeRepositoryError::missing_reference(format!(
                "tag {tag} does not exist"
            )));
        }
        Ok(())
    }

    fn matches(&self, id: RecipeId, recipe: &StoredRecipe, filter: &RecipeFilter) -> bool {
        if filter.author.as_ref().is_some_and(|author| author != &recipe.author) {
            return false;
        }
        let listed_for = |entries: &[(UserId, RecipeId)], user: &Option<UserId>| {
            user.as_ref()
                .is_none_or(|user| entries.iter().any(|(owner, recipe)| owner == user && *recipe == id))
        };
        if !listed_for(&self.favorites, &filter.favorited_by)
            || !listed_for(&self.cart, &filter.in_cart_of)
        {
            return false;
        }
        filter.tags.is_empty()
            || recipe.tags.iter().any(|tag| {
                self.tags
                    .get(&tag.get())
                    .is_some_and(|stored| filter.tags.contains(&stored.slug))
            })
    }
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    items
        .iter()
        .skip(offset)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

/// In-memory implementation of the repository ports.
///
/// # Examples
/// ```
/// use foodgram::domain::{Email, PersonName, User, UserId, UserRole, Username};
/// use foodgram::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::default();
/// let user = User::new(
///     UserId::random(),
///     Email::new("ada@example.com").unwrap(),
///     Username::new("ada").unwrap(),
///     PersonName::new("Ada", "Lovelace").unwrap(),
///     UserRole::User,
/// );
/// store.insert_user(user, "secret");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an account with a login password.
    ///
    /// Accounts are provisioned out of band; this is the in-memory
    /// counterpart of inserting a row into `users`.
    pub fn insert_user(&self, user: User, password: &str) {
        let password_digest = password_digest(user.id(), password);
        let mut state = self.lock();
        state.users.retain(|stored| stored.user.id() != user.id());
        state.users.push(StoredUser {
            user,
            password_digest,
        });
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock();
        Ok(state
            .users
            .iter()
            .filter(|stored| ids.contains(stored.user.id()))
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let state = self.lock();
        Ok(state
            .users
            .iter()
            .find(|stored| stored.user.email() == email)
            .map(|stored| StoredCredentials {
                user_id: stored.user.id().clone(),
                password_digest: stored.password_digest.clone(),
            }))
    }

    async fn list(&self, page: PageRequest) -> Result<PageSlice<User>, UserPersistenceError> {
        let state = self.lock();
        let users: Vec<User> = state
            .users_by_username(|_| true)
            .into_iter()
            .cloned()
            .collect();
        Ok(PageSlice::new(page_of(&users, page), users.len() as u64))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogRepositoryError> {
        let mut tags: Vec<Tag> = self.lock().tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(tags)
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogRepositoryError> {
        Ok(self.lock().tags.get(&id.get()).cloned())
    }

    async fn insert_tag(&self, tag: &NewTag) -> Result<Tag, CatalogRepositoryError> {
        let mut state = self.lock();
        if state.tags.values().any(|stored| stored.color == tag.color) {
            return Err(CatalogRepositoryError::duplicate("color"));
        }
        if state.tags.values().any(|stored| stored.slug == tag.slug) {
            return Err(CatalogRepositoryError::duplicate("slug"));
        }
        state.last_tag_id += 1;
        let stored = Tag {
            id: TagId::new(state.last_tag_id),
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        };
        state.tags.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn list_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        let prefix = name_prefix.map(|prefix| prefix.to_lowercase());
        let mut ingredients: Vec<Ingredient> = self
            .lock()
            .ingredients
            .values()
            .filter(|ingredient| {
                prefix.as_deref().is_none_or(|prefix| {
                    ingredient.name.as_ref().to_lowercase().starts_with(prefix)
                })
            })
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(ingredients)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogRepositoryError> {
        Ok(self.lock().ingredients.get(&id.get()).cloned())
    }

    async fn insert_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, CatalogRepositoryError> {
        let mut state = self.lock();
        state.last_ingredient_id += 1;
        let stored = Ingredient {
            id: IngredientId::new(state.last_ingredient_id),
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
        };
        state.ingredients.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn missing_tags(&self, ids: &[TagId]) -> Result<Vec<TagId>, CatalogRepositoryError> {
        let state = self.lock();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !state.tags.contains_key(&id.get()))
            .collect())
    }

    async fn missing_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, CatalogRepositoryError> {
        let state = self.lock();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !state.ingredients.contains_key(&id.get()))
            .collect())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn insert(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut state = self.lock();
        state.check_references(draft)?;
        state.last_recipe_id += 1;
        let id = state.last_recipe_id;
        state
            .recipes
            .insert(id, StoredRecipe::from_draft(author.clone(), draft));
        Ok(RecipeId::new(id))
    }

    async fn replace(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock();
        state.check_references(draft)?;
        let Some(stored) = state.recipes.get_mut(&id.get()) else {
            return Ok(false);
        };
        *stored = StoredRecipe::from_draft(stored.author.clone(), draft);
        Ok(true)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock();
        if state.recipes.remove(&id.get()).is_none() {
            return Ok(false);
        }
        state.favorites.retain(|(_, recipe)| *recipe != id);
        state.cart.retain(|(_, recipe)| *recipe != id);
        Ok(true)
    }

    async fn find(&self, id: RecipeId) -> Result<Option<RecipeRecord>, RecipeRepositoryError> {
        let state = self.lock();
        state
            .recipes
            .get(&id.get())
            .map(|recipe| state.record(id.get(), recipe))
            .transpose()
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeRecord>, RecipeRepositoryError> {
        let state = self.lock();
        let matching: Vec<(i64, &StoredRecipe)> = state
            .recipes
            .iter()
            .rev()
            .filter(|(id, recipe)| state.matches(RecipeId::new(**id), recipe, filter))
            .map(|(id, recipe)| (*id, recipe))
            .collect();
        let records = page_of(&matching, page)
            .into_iter()
            .map(|(id, recipe)| state.record(id, recipe))
            .collect::<Result<_, _>>()?;
        Ok(PageSlice::new(records, matching.len() as u64))
    }

    async fn summaries_by_author(
        &self,
        author: &UserId,
        limit: u32,
    ) -> Result<Vec<RecipeSummary>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .iter()
            .rev()
            .filter(|(_, recipe)| &recipe.author == author)
            .take(limit as usize)
            .map(|(id, recipe)| recipe.summary(RecipeId::new(*id)))
            .collect())
    }

    async fn count_by_author(&self, author: &UserId) -> Result<u64, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .values()
            .filter(|recipe| &recipe.author == author)
            .count() as u64)
    }
}

#[async_trait]
impl RecipeRelationRepository for InMemoryStore {
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RelationRepositoryError> {
        let mut state = self.lock();
        if !state.recipes.contains_key(&recipe.get()) {
            return Err(RelationRepositoryError::query(format!(
                "recipe {recipe} does not exist"
            )));
        }
        let pair = (user.clone(), recipe);
        let entries = state.relation_mut(kind);
        if entries.contains(&pair) {
            return Ok(false);
        }
        entries.push(pair);
        Ok(true)
    }

    async fn remove(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RelationRepositoryError> {
        let mut state = self.lock();
        let entries = state.relation_mut(kind);
        let before = entries.len();
        entries.retain(|(owner, id)| !(owner == user && *id == recipe));
        Ok(entries.len() != before)
    }

    async fn memberships(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<RecipeMemberships, RelationRepositoryError> {
        let state = self.lock();
        let collect = |kind| {
            state
                .relation(kind)
                .iter()
                .filter(|(owner, id)| owner == user && recipes.contains(id))
                .map(|(_, id)| *id)
                .collect::<HashSet<_>>()
        };
        Ok(RecipeMemberships {
            favorites: collect(RelationKind::Favorite),
            cart: collect(RelationKind::ShoppingCart),
        })
    }

    async fn cart_ingredients(
        &self,
        user: &UserId,
    ) -> Result<Vec<CartIngredientRow>, RelationRepositoryError> {
        let state = self.lock();
        let mut rows = Vec::new();
        for (_, recipe_id) in state.cart.iter().filter(|(owner, _)| owner == user) {
            let Some(recipe) = state.recipes.get(&recipe_id.get()) else {
                continue;
            };
            for line in &recipe.ingredients {
                let ingredient = state
                    .ingredients
                    .get(&line.ingredient_id.get())
                    .ok_or_else(|| {
                        RelationRepositoryError::query(format!(
                            "ingredient {} is missing",
                            line.ingredient_id
                        ))
                    })?;
                rows.push(CartIngredientRow {
                    name: ingredient.name.as_ref().to_owned(),
                    measurement_unit: ingredient.measurement_unit.as_ref().to_owned(),
                    amount: line.amount,
                });
            }
        }
        Ok(rows)
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn add(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        if follower == author {
            return Err(SubscriptionRepositoryError::query(
                "subscription to self violates check constraint",
            ));
        }
        Ok(self
            .lock()
            .subscriptions
            .insert((follower.clone(), author.clone())))
    }

    async fn remove(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        Ok(self
            .lock()
            .subscriptions
            .remove(&(follower.clone(), author.clone())))
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, SubscriptionRepositoryError> {
        let state = self.lock();
        Ok(authors
            .iter()
            .filter(|author| {
                state
                    .subscriptions
                    .contains(&(follower.clone(), (*author).clone()))
            })
            .cloned()
            .collect())
    }

    async fn authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<PageSlice<User>, SubscriptionRepositoryError> {
        let state = self.lock();
        let followed: Vec<User> = state
            .users_by_username(|user| {
                state
                    .subscriptions
                    .contains(&(follower.clone(), user.id().clone()))
            })
            .into_iter()
            .cloned()
            .collect();
        Ok(PageSlice::new(
            page_of(&followed, page),
            followed.len() as u64,
        ))
    }
}

#[cfg(test)]
mod tests;
