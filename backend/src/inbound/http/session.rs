//! Session helpers keeping handlers free of actix-session details.
//!
//! The cookie holds nothing but the authenticated user's id. A value that no
//! longer parses as a user id is treated as an anonymous session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Request extractor exposing login state.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session for `user_id`.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// The logged-in user, or `None` for anonymous callers.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match UserId::new(&value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "ignoring invalid user id in session cookie");
                None
            }
        }))
    }

    /// The logged-in user, or `401 login required`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/login",
                web::get().to(|session: SessionContext| async move {
                    let id = UserId::new(USER).expect("fixture id");
                    session.persist_user(&id)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/logout",
                web::get().to(|session: SessionContext| async move {
                    session.clear();
                    HttpResponse::NoContent()
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session
                        .insert(USER_ID_KEY, "not-a-uuid")
                        .expect("set invalid user id");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/me",
                web::get().to(|session: SessionContext| async move {
                    let id = session.require_user_id()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                }),
            )
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn get(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        cookie: Option<Cookie<'static>>,
    ) -> actix_web::dev::ServiceResponse {
        let mut req = test::TestRequest::get().uri(uri);
        if let Some(value) = cookie {
            req = req.cookie(value);
        }
        test::call_service(app, req.to_request()).await
    }

    #[actix_web::test]
    async fn login_round_trips_user_id() {
        let app = test::init_service(session_test_app()).await;

        let login = get(&app, "/login", None).await;
        assert_eq!(login.status(), StatusCode::OK);
        let me = get(&app, "/me", Some(session_cookie(&login))).await;

        assert_eq!(me.status(), StatusCode::OK);
        assert_eq!(test::read_body(me).await, USER);
    }

    #[actix_web::test]
    async fn anonymous_caller_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let me = get(&app, "/me", None).await;

        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_expires_the_cookie() {
        let app = test::init_service(session_test_app()).await;
        let login = get(&app, "/login", None).await;

        let logout = get(&app, "/logout", Some(session_cookie(&login))).await;

        assert_eq!(logout.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&logout);
        assert!(cleared.value().is_empty(), "purged cookie carries no value");
    }

    #[actix_web::test]
    async fn tampered_user_id_is_treated_as_anonymous() {
        let app = test::init_service(session_test_app()).await;
        let tampered = get(&app, "/tamper", None).await;

        let me = get(&app, "/me", Some(session_cookie(&tampered))).await;

        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }
}
