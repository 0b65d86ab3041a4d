//! Request helpers shared by the HTTP integration suites.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use foodgram::domain::{User, UserRole};
use foodgram::outbound::memory::InMemoryStore;
use foodgram::test_support::{TEST_PASSWORD, seed_user};
use serde_json::{Value, json};

/// Accounts seeded into every world.
pub struct World {
    pub store: Arc<InMemoryStore>,
    pub admin: User,
    pub alice: User,
    pub bob: User,
}

impl World {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let admin = seed_user(&store, "chef", UserRole::Admin);
        let alice = seed_user(&store, "alice", UserRole::User);
        let bob = seed_user(&store, "bob", UserRole::User);
        Self {
            store,
            admin,
            alice,
            bob,
        }
    }
}

pub async fn call<S>(app: &S, req: test::TestRequest, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    test::call_service(app, req.to_request()).await
}

/// Log in through `/api/v1/login` and return the session cookie.
pub async fn login<S>(app: &S, user: &User) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = call(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": user.email().as_ref(), "password": TEST_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login succeeds");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}

/// Create a tag as `admin`, returning its id.
pub async fn create_tag<S>(
    app: &S,
    admin: &Cookie<'static>,
    name: &str,
    color: &str,
    slug: &str,
) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = call(
        app,
        test::TestRequest::post()
            .uri("/api/v1/tags")
            .set_json(json!({"name": name, "color": color, "slug": slug})),
        Some(admin),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "tag created");
    let body: Value = test::read_body_json(res).await;
    body["id"].as_i64().expect("tag id")
}

/// Create an ingredient as `admin`, returning its id.
pub async fn create_ingredient<S>(app: &S, admin: &Cookie<'static>, name: &str, unit: &str) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = call(
        app,
        test::TestRequest::post()
            .uri("/api/v1/ingredients")
            .set_json(json!({"name": name, "measurementUnit": unit})),
        Some(admin),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "ingredient created");
    let body: Value = test::read_body_json(res).await;
    body["id"].as_i64().expect("ingredient id")
}

pub fn recipe_payload(name: &str, ingredients: &[(i64, u32)], tags: &[i64]) -> Value {
    json!({
        "name": name,
        "image": format!("https://cdn.example.com/{name}.png"),
        "text": "Mix and bake.",
        "cookingTime": 30,
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({"id": id, "amount": amount}))
            .collect::<Vec<_>>(),
        "tags": tags,
    })
}

/// Publish a recipe as the cookie's owner, returning its id.
pub async fn create_recipe<S>(app: &S, author: &Cookie<'static>, payload: Value) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = call(
        app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .set_json(payload),
        Some(author),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "recipe created");
    let body: Value = test::read_body_json(res).await;
    body["id"].as_i64().expect("recipe id")
}
