//! Foodgram backend: recipes, a tag and ingredient catalog, favourites, a
//! shopping cart, and author subscriptions behind a session-authenticated
//! REST API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
