//! Recipe handlers and the shopping-list download.
//!
//! ```text
//! GET    /api/v1/recipes?tags=breakfast&author={uuid}&is_favorited=1&page=2
//! POST   /api/v1/recipes
//! GET    /api/v1/recipes/download_shopping_cart
//! GET    /api/v1/recipes/{id}
//! PUT    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! The download route must be registered before `/recipes/{id}` so the
//! literal segment wins.

use actix_web::http::header::{CONTENT_DISPOSITION, ContentType};
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, RecipeDraft, RecipeDraftParts, RecipeId, RecipeListQuery, RecipeView, Slug,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::page_json;
use crate::inbound::http::schemas::RecipePage;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_recipe_validation_error, page_request, parse_count, parse_flag, parse_user_id,
};

const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Ingredient reference in a recipe payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IngredientAmountRequest {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = 250)]
    pub amount: u32,
}

/// Body of `POST /api/v1/recipes` and `PUT /api/v1/recipes/{id}`.
///
/// Updates replace every field, including the ingredient and tag sets.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Pancakes")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/pancakes.png")]
    pub image: String,
    #[schema(example = "Whisk, rest, fry.")]
    pub text: String,
    #[schema(example = 20)]
    pub cooking_time: u32,
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub tags: Vec<i64>,
}

impl RecipeRequest {
    fn into_draft(self) -> Result<RecipeDraft, Error> {
        RecipeDraft::try_from_parts(RecipeDraftParts {
            name: self.name,
            image: self.image,
            text: self.text,
            cooking_time: self.cooking_time,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|line| (line.id, line.amount))
                .collect(),
            tags: self.tags,
        })
        .map_err(map_recipe_validation_error)
    }
}

fn invalid_tag_filter(value: &str) -> Error {
    Error::invalid_request("tags must be tag slugs").with_details(json!({
        "field": "tags",
        "value": value,
        "code": "invalid_slug",
    }))
}

/// Parse the list query string. `tags` may repeat; unknown keys are ignored.
fn parse_list_query(pairs: Vec<(String, String)>) -> Result<(RecipeListQuery, PageRequest), Error> {
    let mut query = RecipeListQuery::default();
    let mut page = None;
    let mut limit = None;
    for (key, value) in pairs {
        match key.as_str() {
            "page" => page = parse_count(Some(&value), FieldName::new("page"))?,
            "limit" => limit = parse_count(Some(&value), FieldName::new("limit"))?,
            "tags" => {
                let slug = Slug::new(value.as_str()).map_err(|_| invalid_tag_filter(&value))?;
                query.tags.push(slug);
            }
            "author" => query.author = Some(parse_user_id(&value, FieldName::new("author"))?),
            "is_favorited" => {
                query.is_favorited = parse_flag(Some(&value), FieldName::new("is_favorited"))?;
            }
            "is_in_shopping_cart" => {
                query.is_in_shopping_cart =
                    parse_flag(Some(&value), FieldName::new("is_in_shopping_cart"))?;
            }
            _ => {}
        }
    }
    Ok((query, page_request(page, limit)?))
}

/// List recipes newest first.
///
/// Anonymous callers asking for favourites or cart contents get an empty
/// page.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Recipes per page, 1 to 100"),
        ("tags" = Option<Vec<String>>, Query, description = "Tag slugs; any match"),
        ("author" = Option<String>, Query, description = "Author id"),
        ("is_favorited" = Option<u8>, Query, description = "1 to list only my favourites"),
        ("is_in_shopping_cart" = Option<u8>, Query, description = "1 to list only my cart")
    ),
    responses(
        (status = 200, description = "One page of recipes", body = RecipePage),
        (status = 400, description = "Invalid filter", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([])
)]
#[get("/recipes")]
pub async fn list_recipes(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Page<RecipeView>>> {
    let (filter, page) = parse_list_query(query.into_inner())?;
    let viewer = session.user_id()?;
    let slice = state.recipes.list_recipes(viewer, filter, page).await?;
    Ok(page_json(&req, slice, page))
}

/// Publish a recipe as the logged-in user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeView),
        (status = 400, description = "Invalid recipe or unknown ingredient/tag", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let view = state.recipe_authoring.create_recipe(&actor, draft).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Download the aggregated ingredients of every carted recipe as text.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    responses(
        (
            status = 200,
            description = "Shopping list",
            content_type = "text/plain",
            body = String,
            headers(("Content-Disposition" = String, description = "Attachment filename"))
        ),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download_shopping_cart")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let list = state.shopping_list.shopping_list(&user).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
        ))
        .body(list.render_text()))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeView),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeView>> {
    let viewer = session.user_id()?;
    let view = state
        .recipes
        .get_recipe(viewer, RecipeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(view))
}

/// Replace a recipe. Only its author or an administrator may do this.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeView),
        (status = 400, description = "Invalid recipe or unknown ingredient/tag", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeView>> {
    let actor = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let view = state
        .recipe_authoring
        .update_recipe(&actor, RecipeId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(view))
}

/// Delete a recipe together with its favourites and cart entries.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    state
        .recipe_authoring
        .delete_recipe(&actor, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
