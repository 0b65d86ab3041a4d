//! Following authors and browsing subscription cards.

// Shared helpers; not every suite uses all of them.
#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use foodgram::test_support::{memory_app, test_session_settings};
use serde_json::Value;

use support::{World, call, create_ingredient, create_recipe, login, recipe_payload};

#[actix_web::test]
async fn subscriber_sees_author_cards_with_recipe_previews() {
    let world = World::new();
    let app = test::init_service(memory_app(
        world.store.clone(),
        test_session_settings().middleware(),
    ))
    .await;
    let admin = login(&app, &world.admin).await;
    let alice = login(&app, &world.alice).await;
    let bob = login(&app, &world.bob).await;
    let tea = create_ingredient(&app, &admin, "tea", "g").await;
    for name in ["green", "black", "oolong"] {
        create_recipe(&app, &alice, recipe_payload(name, &[(tea, 5)], &[])).await;
    }
    let alice_id = world.alice.id().to_string();

    let res = call(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/users/{alice_id}/subscribe?recipes_limit=1")),
        Some(&bob),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let card: Value = test::read_body_json(res).await;
    assert_eq!(card["username"], "alice");
    assert_eq!(card["isSubscribed"], true);
    assert_eq!(card["recipesCount"], 3);
    assert_eq!(card["recipes"].as_array().map(Vec::len), Some(1));
    assert_eq!(card["recipes"][0]["name"], "oolong");

    let res = call(
        &app,
        test::TestRequest::get().uri("/api/v1/users/subscriptions"),
        Some(&bob),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = test::read_body_json(res).await;
    assert_eq!(page["count"], 1);
    assert_eq!(
        page["results"][0]["recipes"].as_array().map(Vec::len),
        Some(3),
        "default preview size"
    );

    let res = call(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/users/{alice_id}")),
        Some(&bob),
    )
    .await;
    let profile: Value = test::read_body_json(res).await;
    assert_eq!(profile["isSubscribed"], true);

    let res = call(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/users/{alice_id}")),
        None,
    )
    .await;
    let profile: Value = test::read_body_json(res).await;
    assert_eq!(profile["isSubscribed"], false);
}

#[actix_web::test]
async fn subscription_edges_are_rejected() {
    let world = World::new();
    let app = test::init_service(memory_app(
        world.store.clone(),
        test_session_settings().middleware(),
    ))
    .await;
    let bob = login(&app, &world.bob).await;
    let alice_uri = format!("/api/v1/users/{}/subscribe", world.alice.id());
    let bob_uri = format!("/api/v1/users/{}/subscribe", world.bob.id());

    let res = call(&app, test::TestRequest::post().uri(&bob_uri), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "self subscription");

    let res = call(&app, test::TestRequest::delete().uri(&alice_uri), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "not subscribed yet");

    let res = call(&app, test::TestRequest::post().uri(&alice_uri), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = call(&app, test::TestRequest::post().uri(&alice_uri), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "duplicate subscription");

    let res = call(&app, test::TestRequest::delete().uri(&alice_uri), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = call(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/00000000-0000-4000-8000-000000000000/subscribe"),
        Some(&bob),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
