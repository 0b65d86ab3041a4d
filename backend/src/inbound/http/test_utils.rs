//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test as actix_test};

use crate::domain::ports::{
    MockCatalogCommand, MockCatalogQuery, MockLoginService, MockRecipeRelationsCommand,
    MockRecipesCommand, MockRecipesQuery, MockShoppingListQuery, MockSubscriptionsCommand,
    MockSubscriptionsQuery, MockUsersQuery,
};
use crate::inbound::http::session::USER_ID_KEY;
use crate::inbound::http::state::HttpState;

/// User id planted by [`seed_session`].
pub const TEST_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Route path tests mount [`seed_session`] on.
pub const SEED_SESSION_PATH: &str = "/test/session";

/// Session middleware with a fresh key, cookie name `session`, and the
/// `Secure` flag off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// One mock per driving port. Tests set expectations on the ports they
/// exercise; any unexpected call panics.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub users: MockUsersQuery,
    pub catalog: MockCatalogQuery,
    pub catalog_admin: MockCatalogCommand,
    pub recipes: MockRecipesQuery,
    pub recipe_authoring: MockRecipesCommand,
    pub relations: MockRecipeRelationsCommand,
    pub shopping_list: MockShoppingListQuery,
    pub subscriptions: MockSubscriptionsQuery,
    pub subscription_commands: MockSubscriptionsCommand,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            users: Arc::new(self.users),
            catalog: Arc::new(self.catalog),
            catalog_admin: Arc::new(self.catalog_admin),
            recipes: Arc::new(self.recipes),
            recipe_authoring: Arc::new(self.recipe_authoring),
            relations: Arc::new(self.relations),
            shopping_list: Arc::new(self.shopping_list),
            subscriptions: Arc::new(self.subscriptions),
            subscription_commands: Arc::new(self.subscription_commands),
        }
    }
}

/// Handler that logs the caller in as [`TEST_USER`] without going through
/// the login port.
pub async fn seed_session(session: Session) -> HttpResponse {
    session
        .insert(USER_ID_KEY, TEST_USER)
        .expect("session insert succeeds");
    HttpResponse::Ok().finish()
}

/// Call [`SEED_SESSION_PATH`] and return the issued session cookie.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri(SEED_SESSION_PATH)
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}
