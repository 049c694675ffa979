//! Meal CRUD and metrics over the full route table.

mod support;

use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use diet_backend::domain::MEAL_NOT_FOUND_MESSAGE;
use diet_backend::inbound::http::meals::MEAL_UPDATED_MESSAGE;

use support::{create_meal, init_app, list_meals, meal_payload, memory_backend, register, send};

const JUNE_FIRST_MILLIS: i64 = 1_717_200_000_000;
const JUNE_SECOND_MILLIS: i64 = 1_717_286_400_000;

#[rstest]
#[case(test::TestRequest::get().uri("/meals"))]
#[case(test::TestRequest::get().uri("/meals/metrics"))]
#[case(test::TestRequest::post().uri("/meals").set_json(meal_payload("Soup", true, "2024-06-01")))]
#[case(test::TestRequest::delete().uri("/meals/3fa85f64-5717-4562-b3fc-2c963f66afa6"))]
#[actix_web::test]
async fn meal_routes_require_a_session(#[case] request: test::TestRequest) {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;

    let res = send(&app, request, None).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("unauthorized"));
    assert!(backend.meals.is_empty());
}

#[rstest]
#[actix_web::test]
async fn created_meal_is_readable_by_id() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    let id = create_meal(&app, &cookie, meal_payload("Soup", true, "2024-06-01")).await;
    let res = send(
        &app,
        test::TestRequest::get().uri(&format!("/meals/{id}")),
        Some(&cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["name"], json!("Soup"));
    assert_eq!(body["description"], json!("Soup description"));
    assert_eq!(body["is_on_diet"], json!(true));
    assert_eq!(body["date"], json!(JUNE_FIRST_MILLIS));
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[rstest]
#[case(String::new())]
#[case(" ".to_owned())]
#[case("x".repeat(201))]
#[actix_web::test]
async fn any_meal_name_round_trips(#[case] name: String) {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    let id = create_meal(&app, &cookie, meal_payload(&name, false, "2024-06-01")).await;
    let res = send(
        &app,
        test::TestRequest::get().uri(&format!("/meals/{id}")),
        Some(&cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], json!(name));
}

#[rstest]
#[case(test::TestRequest::get())]
#[case(test::TestRequest::put().set_json(meal_payload("Soup", true, "2024-06-01")))]
#[case(test::TestRequest::patch().set_json(json!({ "is_on_diet": false })))]
#[actix_web::test]
async fn unknown_meal_reports_error_key(#[case] request: test::TestRequest) {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    let res = send(
        &app,
        request.uri("/meals/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
        Some(&cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!(MEAL_NOT_FOUND_MESSAGE));
    assert_eq!(body["error"], json!(MEAL_NOT_FOUND_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn listing_is_newest_first() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    create_meal(&app, &cookie, meal_payload("Breakfast", true, "2024-06-01")).await;
    create_meal(&app, &cookie, meal_payload("Dinner", false, "2024-06-02")).await;

    let names: Vec<Value> = list_meals(&app, &cookie)
        .await
        .into_iter()
        .map(|meal| meal["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Dinner"), json!("Breakfast")]);
}

#[rstest]
#[actix_web::test]
async fn patch_changes_only_supplied_fields() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;
    let id = create_meal(&app, &cookie, meal_payload("Soup", true, "2024-06-01")).await;
    backend.clock.advance_seconds(60);

    let res = send(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/meals/{id}"))
            .set_json(json!({ "is_on_diet": false })),
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], json!(MEAL_UPDATED_MESSAGE));

    let meals = list_meals(&app, &cookie).await;
    let meal = &meals[0];
    assert_eq!(meal["is_on_diet"], json!(false));
    assert_eq!(meal["name"], json!("Soup"));
    assert_eq!(meal["description"], json!("Soup description"));
    assert_eq!(meal["date"], json!(JUNE_FIRST_MILLIS));
    assert_ne!(meal["updated_at"], meal["created_at"]);
}

#[rstest]
#[actix_web::test]
async fn put_replaces_every_field() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;
    let id = create_meal(&app, &cookie, meal_payload("Soup", true, "2024-06-01")).await;

    let res = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/meals/{id}"))
            .set_json(json!({
                "name": "Burger",
                "description": "Double cheese",
                "is_on_diet": false,
                "date": JUNE_SECOND_MILLIS,
            })),
        Some(&cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["name"], json!("Burger"));
    assert_eq!(body["description"], json!("Double cheese"));
    assert_eq!(body["is_on_diet"], json!(false));
    assert_eq!(body["date"], json!(JUNE_SECOND_MILLIS));
}

#[rstest]
#[actix_web::test]
async fn put_with_missing_field_is_rejected_and_keeps_meal() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;
    let id = create_meal(&app, &cookie, meal_payload("Soup", true, "2024-06-01")).await;

    let res = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/meals/{id}"))
            .set_json(json!({ "name": "Burger" })),
        Some(&cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let meals = list_meals(&app, &cookie).await;
    assert_eq!(meals[0]["name"], json!("Soup"));
}

#[rstest]
#[actix_web::test]
async fn delete_removes_meal_and_is_idempotent() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;
    let id = create_meal(&app, &cookie, meal_payload("Soup", true, "2024-06-01")).await;

    for _ in 0..2 {
        let res = send(
            &app,
            test::TestRequest::delete().uri(&format!("/meals/{id}")),
            Some(&cookie),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    assert!(list_meals(&app, &cookie).await.is_empty());
    assert!(backend.meals.is_empty());
}

#[rstest]
#[actix_web::test]
async fn meals_of_other_sessions_are_invisible() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let owner = register(&app, "Ada", "ada@example.com").await;
    let intruder = register(&app, "Grace", "grace@example.com").await;
    let id = create_meal(&app, &owner, meal_payload("Soup", true, "2024-06-01")).await;
    let uri = format!("/meals/{id}");

    let requests = [
        test::TestRequest::get().uri(&uri),
        test::TestRequest::put()
            .uri(&uri)
            .set_json(meal_payload("Stolen", false, "2024-06-02")),
        test::TestRequest::patch()
            .uri(&uri)
            .set_json(json!({ "name": "Stolen" })),
    ];
    for request in requests {
        let res = send(&app, request, Some(&intruder)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!(MEAL_NOT_FOUND_MESSAGE));
        assert_eq!(body["code"], json!("not_found"));
    }

    let res = send(&app, test::TestRequest::delete().uri(&uri), Some(&intruder)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    assert!(list_meals(&app, &intruder).await.is_empty());
    let owned = list_meals(&app, &owner).await;
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0]["name"], json!("Soup"));
}

#[rstest]
#[actix_web::test]
async fn metrics_follow_meal_dates() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    // Created out of date order; the streak is computed by date.
    create_meal(&app, &cookie, meal_payload("Lunch", false, "2024-06-03")).await;
    create_meal(&app, &cookie, meal_payload("Breakfast", true, "2024-06-01")).await;
    create_meal(&app, &cookie, meal_payload("Dinner", true, "2024-06-04")).await;
    create_meal(&app, &cookie, meal_payload("Brunch", true, "2024-06-02")).await;

    let res = send(&app, test::TestRequest::get().uri("/meals/metrics"), Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({
            "totalMeals": 4,
            "totalMealsOnDiet": 3,
            "totalMealsOffDiet": 1,
            "bestOnDietSequence": 2,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn metrics_for_new_user_are_zero() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    let res = send(&app, test::TestRequest::get().uri("/meals/metrics"), Some(&cookie)).await;

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["totalMeals"], json!(0));
    assert_eq!(body["bestOnDietSequence"], json!(0));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;

    let res = send(
        &app,
        test::TestRequest::post()
            .uri("/meals")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": "),
        Some(&cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert!(backend.meals.is_empty());
}

#[rstest]
#[actix_web::test]
async fn unavailable_meal_store_maps_to_service_unavailable() {
    let backend = memory_backend();
    let app = init_app(&backend, Key::generate()).await;
    let cookie = register(&app, "Ada", "ada@example.com").await;
    backend.meals.set_unavailable(true);

    let res = send(&app, test::TestRequest::get().uri("/meals"), Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
