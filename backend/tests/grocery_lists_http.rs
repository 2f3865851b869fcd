//! End-to-end coverage for grocery lists and items over in-memory storage.

use actix_web::test;
use serde_json::{Value, json};

mod support;

use support::{USER_1, USER_2, authorised, init_app, memory_state};

#[actix_web::test]
async fn weekly_shopping_scenario() {
    let app = init_app(memory_state()).await;

    let list: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::post().uri("/api/v1/grocery-lists"), USER_1)
            .set_json(json!({"name": "Weekly Shopping"}))
            .to_request(),
    )
    .await;
    assert_eq!(list["items"], json!([]));
    let list_id = list["id"].as_str().expect("list id").to_owned();

    let item: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::post().uri(&format!("/api/v1/grocery-lists/{list_id}/items")),
            USER_1,
        )
        .set_json(json!({"name": "Milk", "quantity": "1 gallon"}))
        .to_request(),
    )
    .await;
    assert_eq!(item["name"], "Milk");
    assert_eq!(item["quantity"], "1 gallon");
    assert_eq!(item["checked"], false);

    let fetched: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::get().uri(&format!("/api/v1/grocery-lists/{list_id}")),
            USER_1,
        )
        .to_request(),
    )
    .await;
    assert_eq!(fetched["items"], json!([item]));

    let foreign: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::get().uri(&format!("/api/v1/grocery-lists/{list_id}")),
            USER_2,
        )
        .to_request(),
    )
    .await;
    assert_eq!(foreign, Value::Null);
}

#[actix_web::test]
async fn adding_to_an_unknown_list_creates_nothing() {
    let app = init_app(memory_state()).await;

    let item: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::post()
                .uri("/api/v1/grocery-lists/3fa85f64-5717-4562-b3fc-2c963f66afa6/items"),
            USER_1,
        )
        .set_json(json!({"name": "Milk"}))
        .to_request(),
    )
    .await;
    assert_eq!(item, Value::Null);

    let lists: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::get().uri("/api/v1/grocery-lists"), USER_1).to_request(),
    )
    .await;
    assert_eq!(lists, json!([]));
}

#[actix_web::test]
async fn deleting_a_list_takes_its_items() {
    let app = init_app(memory_state()).await;
    let list: Value = test::call_and_read_body_json(
        &app,
        authorised(test::TestRequest::post().uri("/api/v1/grocery-lists"), USER_1)
            .set_json(json!({"name": "Party"}))
            .to_request(),
    )
    .await;
    let list_id = list["id"].as_str().expect("list id").to_owned();
    let item: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::post().uri(&format!("/api/v1/grocery-lists/{list_id}/items")),
            USER_1,
        )
        .set_json(json!({"name": "Crisps"}))
        .to_request(),
    )
    .await;
    let item_id = item["id"].as_str().expect("item id").to_owned();

    let deleted: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::delete().uri(&format!("/api/v1/grocery-lists/{list_id}")),
            USER_1,
        )
        .to_request(),
    )
    .await;
    assert_eq!(deleted["items"], json!([item]));

    let gone: Value = test::call_and_read_body_json(
        &app,
        authorised(
            test::TestRequest::delete()
                .uri(&format!("/api/v1/grocery-lists/{list_id}/items/{item_id}")),
            USER_1,
        )
        .to_request(),
    )
    .await;
    assert_eq!(gone, Value::Null);
}
