//! Login, user directory, and subscription handlers.
//!
//! ```text
//! POST   /api/v1/login {"email":"ada@example.com","password":"secret"}
//! POST   /api/v1/logout
//! GET    /api/v1/users?page=1&limit=6
//! GET    /api/v1/users/me
//! GET    /api/v1/users/subscriptions?recipes_limit=3
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users/{id}/subscribe
//! DELETE /api/v1/users/{id}/subscribe
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, LoginCredentials, SubscriptionCard, UserCard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::{PageQuery, page_json};
use crate::inbound::http::schemas::{SubscriptionPage, UserPage};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_login_validation_error, parse_user_id};

const USER_ID_FIELD: FieldName = FieldName::new("id");

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// `recipes_limit` query parameter for subscription cards.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipesLimitQuery {
    /// Maximum number of recipe previews per author.
    pub recipes_limit: Option<u32>,
}

/// Query parameters of `GET /users/subscriptions`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionsQueryParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Authors per page, 1 to 100.
    pub limit: Option<u32>,
    /// Maximum number of recipe previews per author.
    pub recipes_limit: Option<u32>,
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "user logged in");
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// List users ordered by username.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 400, description = "Invalid pagination", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<UserCard>>> {
    let page = query.request()?;
    let viewer = session.user_id()?;
    let slice = state.users.list_users(viewer, page).await?;
    Ok(page_json(&req, slice, page))
}

/// The logged-in user's own card.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserCard),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserCard>> {
    let me = session.require_user_id()?;
    let card = state.users.get_user(Some(me.clone()), &me).await?;
    Ok(web::Json(card))
}

/// Authors the logged-in user follows, with recipe previews.
#[utoipa::path(
    get,
    path = "/api/v1/users/subscriptions",
    params(SubscriptionsQueryParams),
    responses(
        (status = 200, description = "One page of followed authors", body = SubscriptionPage),
        (status = 400, description = "Invalid query", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "listSubscriptions"
)]
#[get("/users/subscriptions")]
pub async fn list_subscriptions(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SubscriptionsQueryParams>,
) -> ApiResult<web::Json<Page<SubscriptionCard>>> {
    let me = session.require_user_id()?;
    let params = query.into_inner();
    let page = PageQuery {
        page: params.page,
        limit: params.limit,
    }
    .request()?;
    let slice = state
        .subscriptions
        .subscriptions(&me, page, params.recipes_limit)
        .await?;
    Ok(page_json(&req, slice, page))
}

/// One user's card.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserCard),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserCard>> {
    let id = parse_user_id(&path.into_inner(), USER_ID_FIELD)?;
    let viewer = session.user_id()?;
    let card = state.users.get_user(viewer, &id).await?;
    Ok(web::Json(card))
}

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/subscribe",
    params(("id" = String, Path, description = "Author id"), RecipesLimitQuery),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionCard),
        (status = 400, description = "Self or repeated subscription", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown author", body = Error)
    ),
    tags = ["users"],
    operation_id = "subscribe"
)]
#[post("/users/{id}/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<RecipesLimitQuery>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    let author = parse_user_id(&path.into_inner(), USER_ID_FIELD)?;
    let card = state
        .subscription_commands
        .subscribe(&me, &author, query.recipes_limit)
        .await?;
    Ok(HttpResponse::Created().json(card))
}

/// Stop following an author.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/subscribe",
    params(("id" = String, Path, description = "Author id")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 400, description = "Not subscribed", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "unsubscribe"
)]
#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    let author = parse_user_id(&path.into_inner(), USER_ID_FIELD)?;
    state
        .subscription_commands
        .unsubscribe(&me, &author)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
