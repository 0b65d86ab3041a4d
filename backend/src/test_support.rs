//! Helpers shared by integration tests.
//!
//! Compiled only with the `test-support` feature. Everything here runs
//! against [`InMemoryStore`], so suites exercise the real services and HTTP
//! adapters without a database.

use std::io::Write;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::cookie::SameSite;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use tempfile::NamedTempFile;

use crate::Trace;
use crate::domain::{
    DEFAULT_RECIPES_LIMIT, Email, PersonName, RecipeRepositories, User, UserId, UserRole, Username,
};
use crate::inbound::http;
use crate::inbound::http::error::{json_config, path_config, query_config};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Password every seeded account logs in with.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Build and register an account in `store`.
///
/// The email is `{username}@example.com`; the display name is derived from
/// the username.
///
/// # Panics
/// Panics when `username` is not a valid username.
pub fn seed_user(store: &InMemoryStore, username: &str, role: UserRole) -> User {
    let user = User::new(
        UserId::random(),
        Email::new(format!("{username}@example.com")).expect("seed email is valid"),
        Username::new(username).expect("seed username is valid"),
        PersonName::new(username, "Tester").expect("seed name is valid"),
        role,
    );
    store.insert_user(user.clone(), TEST_PASSWORD);
    user
}

/// Repository bundle where every port is served by the same store.
pub fn memory_repositories(
    store: Arc<InMemoryStore>,
) -> RecipeRepositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore>
{
    RecipeRepositories {
        recipes: Arc::clone(&store),
        catalog: Arc::clone(&store),
        users: Arc::clone(&store),
        relations: Arc::clone(&store),
        subscriptions: store,
    }
}

/// Session settings for plain-HTTP tests with a throwaway key.
pub fn test_session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

/// The full `/api/v1` application backed by `store`.
///
/// Mirrors the production wiring: trace middleware, extractor error
/// handlers, and cookie sessions on the API scope.
pub fn memory_app(
    store: Arc<InMemoryStore>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_repositories(memory_repositories(store), DEFAULT_RECIPES_LIMIT);
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .configure(http::configure),
        )
}

/// Write `bytes` to a temporary session key file.
///
/// The file is removed when the returned handle is dropped.
pub fn session_key_file(bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
