//! End-to-end coverage for the recipe endpoints over in-memory storage.

use actix_web::http::StatusCode;
use actix_web::test;
use pantry::domain::TRACE_ID_HEADER;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

use support::{USER_1, USER_2, authorised, init_app, memory_state};

fn pancakes() -> Value {
    json!({
        "name": "Pancakes",
        "type": "food",
        "ingredients": [{"name": "flour", "amount": 2, "unit": "cups"}],
        "instructions": ["Mix", "Cook"],
    })
}

#[actix_web::test]
async fn pancakes_scenario_is_isolated_per_user() {
    let app = init_app(memory_state()).await;

    let created: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::post().uri("/api/v1/recipes"), USER_1)
            .set_json(pancakes())
            .to_request(),
    )
    .await;
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(created["name"], "Pancakes");
    assert_eq!(created["ingredients"], pancakes()["ingredients"]);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let theirs: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::get().uri("/api/v1/recipes"), USER_2).to_request(),
    )
    .await;
    assert_eq!(theirs, json!([]));

    let mine: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::get().uri("/api/v1/recipes"), USER_1).to_request(),
    )
    .await;
    assert_eq!(mine, json!([created]));

    let by_id: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::get().uri(&format!("/api/v1/recipes/{}", created["id"].as_str().unwrap_or_default())),
            USER_1,
        )
        .to_request(),
    )
    .await;
    assert_eq!(by_id, created);
}

#[actix_web::test]
async fn update_of_unknown_recipe_changes_nothing() {
    let app = init_app(memory_state()).await;
    let created: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::post().uri("/api/v1/recipes"), USER_1)
            .set_json(pancakes())
            .to_request(),
    )
    .await;

    let response: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::put().uri("/api/v1/recipes/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            USER_1,
        )
        .set_json(json!({"name": "Waffles"}))
        .to_request(),
    )
    .await;
    assert_eq!(response, Value::Null);

    let all: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::get().uri("/api/v1/recipes"), USER_1).to_request(),
    )
    .await;
    assert_eq!(all, json!([created]));
}

#[actix_web::test]
async fn responses_carry_trace_ids() {
    let app = init_app(memory_state()).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/recipes").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header.as_str());
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = init_app(memory_state()).await;
    let response = test::call_service(
        &app,
        authorised(test::TestRequest::post().uri("/api/v1/recipes"), USER_1)
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\":")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case::negative_amount(json!({"name": "flour", "amount": -1, "unit": "cups"}))]
#[case::blank_name(json!({"name": "  ", "amount": 2, "unit": "cups"}))]
#[case::blank_unit(json!({"name": "flour", "amount": 2, "unit": ""}))]
#[actix_web::test]
async fn invalid_ingredients_are_rejected_and_not_stored(#[case] ingredient: Value) {
    let app = init_app(memory_state()).await;
    let mut payload = pancakes();
    payload["ingredients"] = json!([ingredient]);

    let response = test::call_service(
        &app,
        authorised(test::TestRequest::post().uri("/api/v1/recipes"), USER_1)
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "ingredients");
    assert_eq!(body["details"]["index"], 0);

    let stored: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::get().uri("/api/v1/recipes"), USER_1).to_request(),
    )
    .await;
    assert_eq!(stored, json!([]));
}

#[actix_web::test]
async fn health_probes_need_no_token() {
    let app = init_app(memory_state()).await;
    for uri in ["/health/ready", "/health/live"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
