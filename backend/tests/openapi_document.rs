//! Shape of the generated OpenAPI document.

use rstest::rstest;
use serde_json::Value;
use utoipa::OpenApi;

use diet_backend::ApiDoc;
use diet_backend::doc::SESSION_SECURITY_SCHEME;

fn document() -> Value {
    let json = ApiDoc::openapi().to_json().expect("serialise OpenAPI document");
    serde_json::from_str(&json).expect("document is valid JSON")
}

#[rstest]
#[case("/user", "post")]
#[case("/meals", "get")]
#[case("/meals", "post")]
#[case("/meals/metrics", "get")]
#[case("/meals/{meal_id}", "get")]
#[case("/meals/{meal_id}", "put")]
#[case("/meals/{meal_id}", "patch")]
#[case("/meals/{meal_id}", "delete")]
#[case("/health/ready", "get")]
#[case("/health/live", "get")]
fn documents_every_route(#[case] path: &str, #[case] method: &str) {
    let doc = document();
    assert!(
        doc["paths"][path][method].is_object(),
        "{method} {path} missing from document"
    );
}

#[rstest]
fn session_scheme_names_the_cookie() {
    let doc = document();
    let scheme = &doc["components"]["securitySchemes"][SESSION_SECURITY_SCHEME];
    assert_eq!(scheme["type"], "apiKey");
    assert_eq!(scheme["in"], "cookie");
    assert_eq!(scheme["name"], "session_id");
}
