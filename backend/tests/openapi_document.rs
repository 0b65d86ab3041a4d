//! The generated OpenAPI document covers the public surface.

use foodgram::ApiDoc;
use rstest::rstest;
use utoipa::OpenApi;

#[rstest]
#[case("/api/v1/recipes")]
#[case("/api/v1/recipes/{id}")]
#[case("/api/v1/recipes/{id}/favorite")]
#[case("/api/v1/recipes/{id}/shopping_cart")]
#[case("/api/v1/recipes/download_shopping_cart")]
#[case("/api/v1/users/subscriptions")]
#[case("/api/v1/users/{id}/subscribe")]
#[case("/api/v1/tags")]
#[case("/api/v1/ingredients")]
#[case("/health/ready")]
fn path_is_documented(#[case] path: &str) {
    let doc = ApiDoc::openapi();

    assert!(doc.paths.paths.contains_key(path), "{path} missing");
}

#[rstest]
fn document_serialises_to_json() {
    let json = ApiDoc::openapi().to_pretty_json().expect("serialise OpenAPI");

    assert!(json.contains("\"Foodgram API\""));
    assert!(json.contains("SessionCookie"));
}
