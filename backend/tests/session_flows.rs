//! Login, logout, and session key handling through the full app.

// Shared helpers; not every suite uses all of them.
#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use foodgram::domain::TRACE_ID_HEADER;
use foodgram::inbound::http::session_config::fingerprint::key_fingerprint;
use foodgram::inbound::http::session_config::{BuildMode, session_settings_from_env};
use foodgram::test_support::{memory_app, session_key_file, test_session_settings};
use mockable::MockEnv;
use serde_json::{Value, json};

use support::{World, call, login};

fn env_for_key(path: String) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string().times(0..).returning(move |name| match name {
        "SESSION_KEY_FILE" => Some(path.clone()),
        "SESSION_COOKIE_SECURE" => Some("0".to_owned()),
        "SESSION_SAMESITE" => Some("Lax".to_owned()),
        "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
        _ => None,
    });
    env
}

#[actix_web::test]
async fn me_follows_the_session_until_logout() {
    let world = World::new();
    let app = test::init_service(memory_app(
        world.store.clone(),
        test_session_settings().middleware(),
    ))
    .await;
    let cookie = login(&app, &world.alice).await;

    let res = call(&app, test::TestRequest::get().uri("/api/v1/users/me"), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let me: Value = test::read_body_json(res).await;
    assert_eq!(me["email"], "alice@example.com");
    assert_eq!(me["isSubscribed"], false);

    let res = call(&app, test::TestRequest::post().uri("/api/v1/logout"), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("cleared cookie")
        .into_owned();

    let res = call(&app, test::TestRequest::get().uri("/api/v1/users/me"), Some(&cleared)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn failed_login_reports_trace_id() {
    let world = World::new();
    let app = test::init_service(memory_app(
        world.store.clone(),
        test_session_settings().middleware(),
    ))
    .await;

    let res = call(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "alice@example.com", "password": "wrong"})),
        None,
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header.as_str());
}

#[actix_web::test]
async fn key_file_sessions_survive_a_restart() {
    let key = session_key_file(&[7_u8; 64]).expect("key file");
    let path = key.path().to_string_lossy().into_owned();
    let first = session_settings_from_env(&env_for_key(path.clone()), BuildMode::Release)
        .expect("release settings");
    let second = session_settings_from_env(&env_for_key(path), BuildMode::Release)
        .expect("release settings");
    assert_eq!(key_fingerprint(&first.key), key_fingerprint(&second.key));

    let world = World::new();
    let before = test::init_service(memory_app(world.store.clone(), first.middleware())).await;
    let cookie = login(&before, &world.bob).await;

    let after = test::init_service(memory_app(world.store.clone(), second.middleware())).await;
    let res = call(&after, test::TestRequest::get().uri("/api/v1/users/me"), Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::OK);
}
