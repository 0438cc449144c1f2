//! Seed data script - populates the database with demo data
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - the demo company and warehouse
//! - 6 products with opening stock
//! - 3 suppliers linked to most products
//! - sales orders spread over the last 45 days
//!
//! Several products end up below their threshold with recent sales, so the
//! low-stock report has something to show.

use anyhow::Context;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::info;

use inventory_api::{
    config, db,
    entities::{product, product_supplier, sales_order, sales_order_item, supplier},
    services::{
        demo::DemoService,
        products::{NewProduct, ProductService},
    },
};

struct SeedProduct {
    name: &'static str,
    sku: &'static str,
    price: Decimal,
    stock: i32,
    /// Units sold per order, one order every `every_days`
    units_per_order: i32,
    every_days: i64,
}

const PRODUCTS: [SeedProduct; 6] = [
    SeedProduct { name: "Wireless Mouse", sku: "SEED-MOUSE-01", price: dec!(24.99), stock: 4, units_per_order: 3, every_days: 3 },
    SeedProduct { name: "USB-C Cable", sku: "SEED-CABLE-01", price: dec!(9.50), stock: 8, units_per_order: 5, every_days: 2 },
    SeedProduct { name: "Laptop Stand", sku: "SEED-STAND-01", price: dec!(39.00), stock: 40, units_per_order: 1, every_days: 5 },
    SeedProduct { name: "Webcam HD", sku: "SEED-CAM-01", price: dec!(59.90), stock: 2, units_per_order: 1, every_days: 10 },
    SeedProduct { name: "Desk Lamp", sku: "SEED-LAMP-01", price: dec!(32.00), stock: 6, units_per_order: 0, every_days: 7 },
    SeedProduct { name: "Keyboard", sku: "SEED-KEYS-01", price: dec!(74.00), stock: 15, units_per_order: 2, every_days: 4 },
];

const SALES_HISTORY_DAYS: i64 = 45;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_tracing("info", false);

    info!("=== Inventory API Seed Data ===");

    let cfg = config::load_config().context("failed to load configuration")?;
    let pool = Arc::new(
        db::establish_connection_from_app_config(&cfg)
            .await
            .context("failed to connect to the database")?,
    );
    db::run_migrations(&pool).await?;

    let fixture = DemoService::new(pool.clone()).bootstrap().await?;
    info!(
        company_id = fixture.company_id,
        warehouse_id = fixture.warehouse_id,
        "Demo company ready"
    );

    let already_seeded = product::Entity::find()
        .filter(product::Column::Sku.eq(PRODUCTS[0].sku))
        .one(pool.as_ref())
        .await?
        .is_some();
    if already_seeded {
        info!("Seed products already present; nothing to do");
        return Ok(());
    }

    let suppliers = create_suppliers(&pool).await?;
    info!("  Created {} suppliers", suppliers.len());

    let products = ProductService::new(pool.clone());
    let mut orders = 0;
    for (index, seed) in PRODUCTS.iter().enumerate() {
        let product_id = products
            .create_product(NewProduct {
                name: seed.name.to_string(),
                sku: seed.sku.to_string(),
                price: seed.price,
                warehouse_id: fixture.warehouse_id,
                initial_quantity: seed.stock,
            })
            .await?;

        // Every third product is left without a supplier
        if index % 3 != 2 {
            let supplier_id = suppliers[index % suppliers.len()];
            product_supplier::ActiveModel {
                product_id: Set(product_id),
                supplier_id: Set(supplier_id),
            }
            .insert(pool.as_ref())
            .await?;
        }

        orders += record_sales(&pool, fixture.company_id, product_id, seed).await?;
    }
    info!("  Created {} products and {} sales orders", PRODUCTS.len(), orders);

    info!(
        "Seed complete. Try GET /api/companies/{}/alerts/low-stock",
        fixture.company_id
    );
    Ok(())
}

async fn create_suppliers(db: &DatabaseConnection) -> anyhow::Result<Vec<i32>> {
    let seeds = [
        ("Northwind Components", Some("orders@northwind.example")),
        ("Contoso Supply", Some("sales@contoso.example")),
        ("Fabrikam Wholesale", None),
    ];

    let mut ids = Vec::with_capacity(seeds.len());
    for (name, email) in seeds {
        let created = supplier::ActiveModel {
            name: Set(name.to_string()),
            contact_email: Set(email.map(str::to_string)),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(created.id);
    }
    Ok(ids)
}

async fn record_sales(
    db: &DatabaseConnection,
    company_id: i32,
    product_id: i32,
    seed: &SeedProduct,
) -> anyhow::Result<usize> {
    if seed.units_per_order == 0 {
        return Ok(0);
    }

    let mut count = 0;
    let mut days_ago = 1;
    while days_ago <= SALES_HISTORY_DAYS {
        let order = sales_order::ActiveModel {
            company_id: Set(company_id),
            created_at: Set(Utc::now() - Duration::days(days_ago)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        sales_order_item::ActiveModel {
            sales_order_id: Set(order.id),
            product_id: Set(product_id),
            quantity: Set(seed.units_per_order),
            ..Default::default()
        }
        .insert(db)
        .await?;

        count += 1;
        days_ago += seed.every_days;
    }
    Ok(count)
}
