//! Shared helpers for the HTTP integration suites.
//!
//! Each suite builds the real application routes over in-memory repositories
//! and drives them with `actix_web::test`.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use diet_backend::Trace;
use diet_backend::inbound::http::configure;
use diet_backend::inbound::http::health::HealthState;
use diet_backend::inbound::http::session::SESSION_COOKIE_NAME;
use diet_backend::test_support::{MemoryBackend, MutableClock, session_middleware};

/// Backend whose clock starts at 2024-06-01T12:00:00Z.
pub fn memory_backend() -> MemoryBackend {
    let start = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid start time");
    MemoryBackend::new(MutableClock::new(start))
}

/// Initialise the application routes over `backend`, signing cookies with `key`.
pub async fn init_app(
    backend: &MemoryBackend,
    key: Key,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(backend.state.clone()))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(session_middleware(key))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Send `request`, attaching `cookie` when given.
pub async fn send<S>(
    app: &S,
    request: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    test::call_service(app, request.to_request()).await
}

/// Session cookie set on `res`, if any.
pub fn issued_cookie(res: &ServiceResponse<BoxBody>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Register a fresh visitor and return the issued session cookie.
pub async fn register<S>(app: &S, name: &str, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = send(
        app,
        test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": name, "email": email })),
        None,
    )
    .await;
    assert_eq!(res.status().as_u16(), 201, "registration should succeed");
    issued_cookie(&res).expect("registration issues a session cookie")
}

/// Meal creation payload.
pub fn meal_payload(name: &str, is_on_diet: bool, date: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "is_on_diet": is_on_diet,
        "date": date,
    })
}

/// Create a meal and return its id from the listing.
pub async fn create_meal<S>(app: &S, cookie: &Cookie<'static>, payload: Value) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let name = payload["name"].as_str().expect("payload name").to_owned();
    let res = send(
        app,
        test::TestRequest::post().uri("/meals").set_json(payload),
        Some(cookie),
    )
    .await;
    assert_eq!(res.status().as_u16(), 201, "meal creation should succeed");

    let listing = list_meals(app, cookie).await;
    listing
        .iter()
        .find(|meal| meal["name"] == json!(name))
        .and_then(|meal| meal["id"].as_str())
        .expect("created meal listed")
        .to_owned()
}

/// `GET /meals` body as an array.
pub async fn list_meals<S>(app: &S, cookie: &Cookie<'static>) -> Vec<Value>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = send(app, test::TestRequest::get().uri("/meals"), Some(cookie)).await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = test::read_body_json(res).await;
    body["meals"].as_array().expect("meals array").clone()
}
