#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use inventory_api::{
    config::AppConfig,
    db,
    entities::{
        company, inventory, product, product_supplier, sales_order, sales_order_item, supplier,
        warehouse,
    },
    services::products::NewProduct,
    AppState,
};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

/// Helper harness for spinning up an application state backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = inventory_api::app_router(state.clone());

        Self { router, state }
    }

    pub fn db(&self) -> &sea_orm::DatabaseConnection {
        &self.state.db
    }

    /// Send a request against the router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a raw, possibly malformed, JSON body.
    pub async fn request_raw(&self, method: Method, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn seed_company(&self, name: &str) -> i32 {
        company::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed company")
        .id
    }

    pub async fn seed_warehouse(&self, company_id: i32, name: &str) -> i32 {
        warehouse::ActiveModel {
            company_id: Set(company_id),
            name: Set(name.to_string()),
            address: Set(None),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed warehouse")
        .id
    }

    /// Provision a product through the service with the default threshold of 10.
    pub async fn seed_product(&self, sku: &str, warehouse_id: i32, quantity: i32) -> i32 {
        self.state
            .services
            .products
            .create_product(NewProduct {
                name: format!("Product {}", sku),
                sku: sku.to_string(),
                price: dec!(9.99),
                warehouse_id,
                initial_quantity: quantity,
            })
            .await
            .expect("seed product")
    }

    pub async fn set_threshold(&self, product_id: i32, threshold: Option<i32>) {
        let model = product::Entity::find_by_id(product_id)
            .one(self.db())
            .await
            .expect("load product")
            .expect("product exists");
        let mut active: product::ActiveModel = model.into();
        active.low_stock_threshold = Set(threshold);
        active.update(self.db()).await.expect("update threshold");
    }

    /// Stock an existing product in another warehouse.
    pub async fn add_inventory(&self, product_id: i32, warehouse_id: i32, quantity: i32) -> i32 {
        inventory::ActiveModel {
            product_id: Set(product_id),
            warehouse_id: Set(warehouse_id),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed inventory")
        .id
    }

    /// One sales order with a single line, placed `days_ago` days in the past.
    pub async fn record_sale(&self, company_id: i32, product_id: i32, quantity: i32, days_ago: i64) {
        let order = sales_order::ActiveModel {
            company_id: Set(company_id),
            created_at: Set(Utc::now() - Duration::days(days_ago)),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed sales order");

        sales_order_item::ActiveModel {
            sales_order_id: Set(order.id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed sales order item");
    }

    pub async fn seed_supplier(&self, name: &str, email: Option<&str>) -> i32 {
        supplier::ActiveModel {
            name: Set(name.to_string()),
            contact_email: Set(email.map(str::to_string)),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed supplier")
        .id
    }

    pub async fn link_supplier(&self, product_id: i32, supplier_id: i32) {
        product_supplier::ActiveModel {
            product_id: Set(product_id),
            supplier_id: Set(supplier_id),
        }
        .insert(self.db())
        .await
        .expect("link supplier");
    }

    pub async fn count<E>(&self) -> u64
    where
        E: EntityTrait,
        E::Model: Send + Sync,
    {
        E::find().count(self.db()).await.expect("count rows")
    }
}

pub async fn response_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&body).expect("response body is json")
}
