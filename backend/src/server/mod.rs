//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use foodgram::Trace;
#[cfg(debug_assertions)]
use foodgram::doc::ApiDoc;
use foodgram::inbound::http;
use foodgram::inbound::http::error::{json_config, path_config, query_config};
use foodgram::inbound::http::health::{HealthState, live, ready};
use foodgram::inbound::http::session_config::SessionSettings;
use foodgram::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .configure(http::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server.
///
/// The returned [`Server`] must be awaited to run. `health_state` is marked
/// ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let session = config.session.clone();
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use foodgram::domain::{DEFAULT_RECIPES_LIMIT, UserRole};
    use foodgram::inbound::http::session_config::SESSION_COOKIE_NAME;
    use foodgram::outbound::memory::InMemoryStore;
    use foodgram::test_support::{
        TEST_PASSWORD, memory_repositories, seed_user, test_session_settings,
    };

    use super::*;

    #[actix_web::test]
    async fn api_scope_issues_session_cookies() {
        let store = Arc::new(InMemoryStore::default());
        let user = seed_user(&store, "alice", UserRole::User);
        let deps = AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::from_repositories(
                memory_repositories(store),
                DEFAULT_RECIPES_LIMIT,
            )),
            session: test_session_settings(),
        };
        let app = test::init_service(build_app(deps)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": user.email().as_ref(), "password": TEST_PASSWORD}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie issued")
            .into_owned();

        let req = test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
