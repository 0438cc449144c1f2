mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use inventory_api::entities::{inventory, inventory_log, product};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

async fn app_with_warehouse() -> (TestApp, i32) {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let warehouse_id = app.seed_warehouse(company_id, "Main").await;
    (app, warehouse_id)
}

fn product_body(sku: &str, warehouse_id: i32, quantity: i64) -> serde_json::Value {
    json!({
        "name": "Widget",
        "sku": sku,
        "price": "19.99",
        "warehouse_id": warehouse_id,
        "initial_quantity": quantity,
    })
}

#[tokio::test]
async fn create_product_writes_product_inventory_and_log() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_body("WID-001", warehouse_id, 25)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("x-request-id"));

    let body = response_json(response).await;
    assert_eq!(body["message"], "Product created");
    let product_id = body["product_id"].as_i64().expect("product_id") as i32;

    let stored = product::Entity::find_by_id(product_id)
        .one(app.db())
        .await
        .unwrap()
        .expect("product row");
    assert_eq!(stored.sku, "WID-001");
    assert_eq!(stored.price.round_dp(2), dec!(19.99));
    assert_eq!(stored.product_type, "single");
    assert_eq!(stored.low_stock_threshold, Some(10));

    let rows = inventory::Entity::find()
        .filter(inventory::Column::ProductId.eq(product_id))
        .filter(inventory::Column::WarehouseId.eq(warehouse_id))
        .all(app.db())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 25);

    let logs = inventory_log::Entity::find().all(app.db()).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].change, 25);
    assert_eq!(logs[0].reason.as_deref(), Some("initial_stock"));
}

#[tokio::test]
async fn price_may_be_a_json_number() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Gadget",
                "sku": "GAD-1",
                "price": 5,
                "warehouse_id": warehouse_id,
                "initial_quantity": 0,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_sku_conflicts_and_writes_nothing() {
    let (app, warehouse_id) = app_with_warehouse().await;
    app.seed_product("DUP-1", warehouse_id, 3).await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_body("DUP-1", warehouse_id, 7)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Conflict");
    assert_eq!(body["message"], "SKU already exists");
    assert!(body["request_id"].is_string());

    assert_eq!(app.count::<product::Entity>().await, 1);
    assert_eq!(app.count::<inventory::Entity>().await, 1);
}

#[tokio::test]
async fn negative_quantity_is_rejected_and_writes_nothing() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_body("NEG-1", warehouse_id, -1)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Initial quantity cannot be negative"));

    assert_eq!(app.count::<product::Entity>().await, 0);
    assert_eq!(app.count::<inventory::Entity>().await, 0);
    assert_eq!(app.count::<inventory_log::Entity>().await, 0);
}

#[tokio::test]
async fn missing_fields_are_listed() {
    let (app, _) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Widget", "price": "1.00" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "Missing fields: sku, warehouse_id, initial_quantity"
    );
}

#[tokio::test]
async fn unparseable_price_is_rejected() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let mut body = product_body("BAD-PRICE", warehouse_id, 1);
    body["price"] = json!("twelve");
    let response = app.request(Method::POST, "/api/products", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count::<product::Entity>().await, 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _) = app_with_warehouse().await;

    let response = app
        .request_raw(Method::POST, "/api/products", "{\"name\": \"Widget\",")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_raw(Method::POST, "/api/products", "{\"initial_quantity\": \"many\"}")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_warehouse_is_not_found() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_body("ORPHAN-1", warehouse_id + 100, 4)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Warehouse not found");
    assert_eq!(app.count::<product::Entity>().await, 0);
}

#[tokio::test]
async fn concurrent_duplicate_creates_yield_one_winner() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let (first, second) = tokio::join!(
        app.request(
            Method::POST,
            "/api/products",
            Some(product_body("RACE-1", warehouse_id, 1)),
        ),
        app.request(
            Method::POST,
            "/api/products",
            Some(product_body("RACE-1", warehouse_id, 2)),
        ),
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(app.count::<product::Entity>().await, 1);
    assert_eq!(app.count::<inventory::Entity>().await, 1);
}

#[tokio::test]
async fn integer_fields_may_be_numeric_strings_or_integral_floats() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "n",
                "sku": "STR-QTY",
                "price": "1",
                "warehouse_id": warehouse_id.to_string(),
                "initial_quantity": "5",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "n",
                "sku": "FLOAT-QTY",
                "price": 1,
                "warehouse_id": warehouse_id,
                "initial_quantity": 5.0,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let quantities: Vec<i32> = inventory::Entity::find()
        .all(app.db())
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.quantity)
        .collect();
    assert_eq!(quantities, vec![5, 5]);
}

#[tokio::test]
async fn fractional_quantity_is_rejected() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "n",
                "sku": "FRAC-QTY",
                "price": 1,
                "warehouse_id": warehouse_id,
                "initial_quantity": 2.5,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid initial_quantity");
    assert_eq!(app.count::<product::Entity>().await, 0);
}

#[tokio::test]
async fn empty_name_is_accepted() {
    let (app, warehouse_id) = app_with_warehouse().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "",
                "sku": "NO-NAME",
                "price": "2.00",
                "warehouse_id": warehouse_id,
                "initial_quantity": 1,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
