//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back to domain types validate
//! again, so a row that violates a domain invariant surfaces as a query error
//! instead of a malformed response.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Email, HexColor, Ingredient, IngredientId, PersonName, Slug, Tag, TagId, Title, User, UserId,
    UserRole, Username,
};

use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart,
    subscriptions, tags, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let email = Email::new(&self.email).map_err(|err| err.to_string())?;
        let username = Username::new(self.username).map_err(|err| err.to_string())?;
        let name =
            PersonName::new(self.first_name, self.last_name).map_err(|err| err.to_string())?;
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|err| err.to_string())?;
        Ok(User::new(
            UserId::from_uuid(self.id),
            email,
            username,
            name,
            role,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    pub id: Uuid,
    pub password_digest: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl TagRow {
    pub(crate) fn into_domain(self) -> Result<Tag, String> {
        Ok(Tag {
            id: TagId::new(self.id),
            name: Title::new("name", self.name).map_err(|err| err.to_string())?,
            color: HexColor::new(self.color).map_err(|err| err.to_string())?,
            slug: Slug::new(self.slug).map_err(|err| err.to_string())?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub slug: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl IngredientRow {
    pub(crate) fn into_domain(self) -> Result<Ingredient, String> {
        Ok(Ingredient {
            id: IngredientId::new(self.id),
            name: Title::new("name", self.name).map_err(|err| err.to_string())?,
            measurement_unit: Title::new("measurementUnit", self.measurement_unit)
                .map_err(|err| err.to_string())?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub name: &'a str,
    pub measurement_unit: &'a str,
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeContentRow<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub author_id: Uuid,
    #[diesel(embed)]
    pub content: RecipeContentRow<'a>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct NewRecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub amount: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_tags)]
pub(crate) struct NewRecipeTagRow {
    pub recipe_id: i64,
    pub tag_id: i64,
}

// ---------------------------------------------------------------------------
// User relations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: Uuid,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shopping_cart)]
pub(crate) struct NewCartRow {
    pub user_id: Uuid,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow {
    pub user_id: Uuid,
    pub author_id: Uuid,
}
