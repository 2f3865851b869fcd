//! Handler tests for the grocery list endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::domain::ports::{MockGroceryListService, MockRecipeService};
use crate::inbound::http::test_utils::{ALICE_TOKEN, BOB_TOKEN, memory_state, send, state_with};

async fn create_list(state: &web::Data<HttpState>, name: &str) -> GroceryListResponseBody {
    let response = send(
        state,
        test::TestRequest::post()
            .uri("/api/v1/grocery-lists")
            .set_json(json!({ "name": name })),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    test::read_body_json(response).await
}

async fn add_milk(state: &web::Data<HttpState>, list_id: Uuid) -> GroceryItemResponseBody {
    let response = send(
        state,
        test::TestRequest::post()
            .uri(&format!("/api/v1/grocery-lists/{list_id}/items"))
            .set_json(json!({"name": "Milk", "quantity": "1 gallon"})),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let item: Option<GroceryItemResponseBody> = test::read_body_json(response).await;
    item.expect("list exists")
}

#[actix_web::test]
async fn weekly_shopping_flow() {
    let state = memory_state();
    let list = create_list(&state, "Weekly Shopping").await;
    assert!(list.items.is_empty());

    let item = add_milk(&state, list.id).await;
    assert!(!item.checked);
    assert_eq!(item.list_id, list.id);

    let response = send(
        &state,
        test::TestRequest::get().uri(&format!("/api/v1/grocery-lists/{}", list.id)),
        ALICE_TOKEN,
    )
    .await;
    let fetched: Option<GroceryListResponseBody> = test::read_body_json(response).await;
    assert_eq!(fetched.map(|l| l.items), Some(vec![item]));
}

#[actix_web::test]
async fn listing_returns_summaries_without_items() {
    let state = memory_state();
    let list = create_list(&state, "Weekly Shopping").await;
    add_milk(&state, list.id).await;

    let response = send(&state, test::TestRequest::get().uri("/api/v1/grocery-lists"), ALICE_TOKEN).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Weekly Shopping");
    assert!(body[0].get("items").is_none());

    let response = send(&state, test::TestRequest::get().uri("/api/v1/grocery-lists"), BOB_TOKEN).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn quantity_null_clears_and_omission_keeps() {
    let state = memory_state();
    let list = create_list(&state, "Weekly Shopping").await;
    let item = add_milk(&state, list.id).await;
    let uri = format!("/api/v1/grocery-lists/{}/items/{}", list.id, item.id);

    let response = send(
        &state,
        test::TestRequest::put().uri(&uri).set_json(json!({"checked": true})),
        ALICE_TOKEN,
    )
    .await;
    let checked: Option<GroceryItemResponseBody> = test::read_body_json(response).await;
    let checked = checked.expect("item exists");
    assert!(checked.checked);
    assert_eq!(checked.quantity.as_deref(), Some("1 gallon"));

    let response = send(
        &state,
        test::TestRequest::put().uri(&uri).set_json(json!({"quantity": null})),
        ALICE_TOKEN,
    )
    .await;
    let cleared: Option<GroceryItemResponseBody> = test::read_body_json(response).await;
    let cleared = cleared.expect("item exists");
    assert_eq!(cleared.quantity, None);
    assert!(cleared.checked);
}

#[actix_web::test]
async fn other_users_cannot_touch_items() {
    let state = memory_state();
    let list = create_list(&state, "Weekly Shopping").await;
    let item = add_milk(&state, list.id).await;
    let item_uri = format!("/api/v1/grocery-lists/{}/items/{}", list.id, item.id);

    let requests = [
        test::TestRequest::post()
            .uri(&format!("/api/v1/grocery-lists/{}/items", list.id))
            .set_json(json!({"name": "Eggs"})),
        test::TestRequest::put()
            .uri(&item_uri)
            .set_json(json!({"checked": true})),
        test::TestRequest::delete().uri(&item_uri),
    ];
    for request in requests {
        let response = send(&state, request, BOB_TOKEN).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, Value::Null);
    }

    let response = send(
        &state,
        test::TestRequest::get().uri(&format!("/api/v1/grocery-lists/{}", list.id)),
        ALICE_TOKEN,
    )
    .await;
    let fetched: Option<GroceryListResponseBody> = test::read_body_json(response).await;
    assert_eq!(fetched.map(|l| l.items), Some(vec![item]));
}

#[actix_web::test]
async fn delete_list_returns_it_with_items() {
    let state = memory_state();
    let list = create_list(&state, "Weekly Shopping").await;
    let item = add_milk(&state, list.id).await;
    let uri = format!("/api/v1/grocery-lists/{}", list.id);

    let response = send(&state, test::TestRequest::delete().uri(&uri), ALICE_TOKEN).await;
    let deleted: Option<GroceryListResponseBody> = test::read_body_json(response).await;
    assert_eq!(deleted.map(|l| l.items), Some(vec![item]));

    let response = send(&state, test::TestRequest::get().uri(&uri), ALICE_TOKEN).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn malformed_item_path_answers_null() {
    let state = memory_state();
    let list = create_list(&state, "Weekly Shopping").await;

    let response = send(
        &state,
        test::TestRequest::delete().uri(&format!("/api/v1/grocery-lists/{}/items/abc", list.id)),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn blank_names_are_rejected() {
    let state = memory_state();
    let response = send(
        &state,
        test::TestRequest::post()
            .uri("/api/v1/grocery-lists")
            .set_json(json!({"name": ""})),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "name");
}

#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut lists = MockGroceryListService::new();
    lists
        .expect_list()
        .times(1)
        .returning(|_| Err(Error::internal("grocery list repository error: syntax error at or near")));
    let state = state_with(Arc::new(MockRecipeService::new()), Arc::new(lists));

    let response = send(&state, test::TestRequest::get().uri("/api/v1/grocery-lists"), ALICE_TOKEN).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}
