//! Tag and ingredient handlers.
//!
//! ```text
//! GET  /api/v1/tags
//! GET  /api/v1/tags/{id}
//! POST /api/v1/tags {"name":"Breakfast","color":"#E26C2D","slug":"breakfast"}
//! GET  /api/v1/ingredients?name=fl
//! GET  /api/v1/ingredients/{id}
//! POST /api/v1/ingredients {"name":"flour","measurementUnit":"g"}
//! ```
//!
//! Reads are open and unpaginated. Writes require an administrator.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Ingredient, IngredientId, NewIngredient, NewTag, Tag, TagId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_catalog_validation_error;

/// Body of `POST /api/v1/tags`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TagRequest {
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "#E26C2D")]
    pub color: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

/// Body of `POST /api/v1/ingredients`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequest {
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

/// `name` prefix filter for ingredient search.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientSearch {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

/// List every tag ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses((status = 200, description = "Tags", body = [Tag])),
    tags = ["catalog"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Tag>>> {
    Ok(web::Json(state.catalog.list_tags().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag", body = Tag),
        (status = 404, description = "Unknown tag", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Tag>> {
    let tag = state.catalog.get_tag(TagId::new(path.into_inner())).await?;
    Ok(web::Json(tag))
}

/// Create a tag. Colour and slug must be unused.
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Invalid tag", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 409, description = "Colour or slug taken", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TagRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let TagRequest { name, color, slug } = payload.into_inner();
    let tag = NewTag::try_from_parts(&name, &color, &slug).map_err(map_catalog_validation_error)?;
    let created = state.catalog_admin.create_tag(&actor, tag).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List ingredients ordered by name, optionally filtered by name prefix.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(IngredientSearch),
    responses((status = 200, description = "Ingredients", body = [Ingredient])),
    tags = ["catalog"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    query: web::Query<IngredientSearch>,
) -> ApiResult<web::Json<Vec<Ingredient>>> {
    let ingredients = state.catalog.list_ingredients(query.into_inner().name).await?;
    Ok(web::Json(ingredients))
}

#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient", body = Ingredient),
        (status = 404, description = "Unknown ingredient", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Ingredient>> {
    let ingredient = state
        .catalog
        .get_ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ingredient))
}

#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = Ingredient),
        (status = 400, description = "Invalid ingredient", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "createIngredient"
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<IngredientRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let IngredientRequest {
        name,
        measurement_unit,
    } = payload.into_inner();
    let ingredient =
        NewIngredient::try_from_parts(&name, &measurement_unit).map_err(map_catalog_validation_error)?;
    let created = state
        .catalog_admin
        .create_ingredient(&actor, ingredient)
        .await?;
    Ok(HttpResponse::Created().json(created))
}
