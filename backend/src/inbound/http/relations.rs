//! Favourite and shopping-cart toggles.
//!
//! ```text
//! POST   /api/v1/recipes/{id}/favorite
//! DELETE /api/v1/recipes/{id}/favorite
//! POST   /api/v1/recipes/{id}/shopping_cart
//! DELETE /api/v1/recipes/{id}/shopping_cart
//! ```

use actix_web::{HttpResponse, delete, post, web};

use crate::domain::{Error, RecipeId, RecipeSummary, RelationKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

async fn add(
    kind: RelationKind,
    state: &HttpState,
    session: &SessionContext,
    recipe: i64,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let summary = state
        .relations
        .add(kind, &user, RecipeId::new(recipe))
        .await?;
    Ok(HttpResponse::Created().json(summary))
}

async fn remove(
    kind: RelationKind,
    state: &HttpState,
    session: &SessionContext,
    recipe: i64,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    state
        .relations
        .remove(kind, &user, RecipeId::new(recipe))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a recipe to the caller's favourites.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Favourited", body = RecipeSummary),
        (status = 400, description = "Already favourited", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "addFavorite"
)]
#[post("/recipes/{id}/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    add(RelationKind::Favorite, &state, &session, path.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed from favourites"),
        (status = 400, description = "Not a favourite", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "removeFavorite"
)]
#[delete("/recipes/{id}/favorite")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove(RelationKind::Favorite, &state, &session, path.into_inner()).await
}

/// Add a recipe to the caller's shopping cart.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Added to cart", body = RecipeSummary),
        (status = 400, description = "Already in cart", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "addToShoppingCart"
)]
#[post("/recipes/{id}/shopping_cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    add(RelationKind::ShoppingCart, &state, &session, path.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed from cart"),
        (status = 400, description = "Not in cart", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "removeFromShoppingCart"
)]
#[delete("/recipes/{id}/shopping_cart")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove(RelationKind::ShoppingCart, &state, &session, path.into_inner()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CookingTime, UserId};
    use crate::inbound::http::test_utils::{
        MockPorts, SEED_SESSION_PATH, TEST_USER, login_cookie, seed_session,
        test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockall::predicate::{always, eq};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .route(SEED_SESSION_PATH, web::get().to(seed_session))
            .service(
                web::scope("/api/v1")
                    .service(add_favorite)
                    .service(remove_favorite)
                    .service(add_to_cart)
                    .service(remove_from_cart),
            )
    }

    #[rstest]
    #[case("favorite", RelationKind::Favorite)]
    #[case("shopping_cart", RelationKind::ShoppingCart)]
    #[actix_web::test]
    async fn add_returns_created_summary(#[case] segment: &str, #[case] kind: RelationKind) {
        let mut ports = MockPorts::default();
        ports
            .relations
            .expect_add()
            .with(
                eq(kind),
                eq(UserId::new(TEST_USER).expect("id")),
                eq(RecipeId::new(5)),
            )
            .return_once(|_, _, recipe| {
                Ok(RecipeSummary {
                    id: recipe,
                    name: "Soup".to_owned(),
                    image: "soup.png".to_owned(),
                    cooking_time: CookingTime::new(15).expect("time"),
                })
            });
        let service = actix_test::init_service(app(ports)).await;
        let cookie = login_cookie(&service).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/recipes/5/{segment}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"id": 5, "name": "Soup", "image": "soup.png", "cookingTime": 15})
        );
    }

    #[actix_web::test]
    async fn duplicate_add_is_a_client_error() {
        let mut ports = MockPorts::default();
        ports
            .relations
            .expect_add()
            .return_once(|kind, _, _| Err(Error::invalid_request(kind.duplicate_message())));
        let service = actix_test::init_service(app(ports)).await;
        let cookie = login_cookie(&service).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes/5/favorite")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("recipe is already in favourites")
        );
    }

    #[actix_web::test]
    async fn remove_answers_no_content() {
        let mut ports = MockPorts::default();
        ports
            .relations
            .expect_remove()
            .with(eq(RelationKind::ShoppingCart), always(), eq(RecipeId::new(8)))
            .return_once(|_, _, _| Ok(()));
        let service = actix_test::init_service(app(ports)).await;
        let cookie = login_cookie(&service).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::delete()
                .uri("/api/v1/recipes/8/shopping_cart")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(actix_test::read_body(res).await.is_empty());
    }

    #[actix_web::test]
    async fn anonymous_toggle_is_unauthorised() {
        let service = actix_test::init_service(app(MockPorts::default())).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes/5/favorite")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
