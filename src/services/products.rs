use crate::{
    db::DbPool,
    entities::{
        inventory, inventory_log,
        product::{self, Column as ProductColumn, Entity as Product},
        warehouse::Entity as Warehouse,
    },
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Validated input for provisioning a product with its opening stock
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub warehouse_id: i32,
    pub initial_quantity: i32,
}

/// Service for provisioning products into a warehouse
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates the product, its inventory row and an `initial_stock` log entry
    /// in one transaction. Returns the new product id.
    #[instrument(skip(self, input), fields(sku = %input.sku, warehouse_id = input.warehouse_id))]
    pub async fn create_product(&self, input: NewProduct) -> Result<i32, ServiceError> {
        if input.initial_quantity < 0 {
            return Err(ServiceError::ValidationError(
                "Initial quantity cannot be negative".to_string(),
            ));
        }

        let txn = self.db_pool.begin().await?;

        let existing = Product::find()
            .filter(ProductColumn::Sku.eq(input.sku.as_str()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            warn!("Rejected product with duplicate SKU");
            return Err(sku_conflict());
        }

        if Warehouse::find_by_id(input.warehouse_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("Warehouse not found".to_string()));
        }

        let product_id = insert_product_rows(&txn, &input).await?;

        txn.commit().await.map_err(map_insert_error)?;

        info!(
            product_id,
            initial_quantity = input.initial_quantity,
            "Product created successfully"
        );
        Ok(product_id)
    }
}

/// Writes the product, its inventory row and the `initial_stock` log entry.
/// Relies on the unique SKU index alone, so it reports a conflict even when
/// a concurrent insert got past the pre-check.
async fn insert_product_rows<C>(conn: &C, input: &NewProduct) -> Result<i32, ServiceError>
where
    C: ConnectionTrait,
{
    let created = product::ActiveModel {
        name: Set(input.name.clone()),
        sku: Set(input.sku.clone()),
        price: Set(input.price),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(map_insert_error)?;

    inventory::ActiveModel {
        product_id: Set(created.id),
        warehouse_id: Set(input.warehouse_id),
        quantity: Set(input.initial_quantity),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(map_insert_error)?;

    inventory_log::ActiveModel {
        product_id: Set(created.id),
        warehouse_id: Set(input.warehouse_id),
        change: Set(input.initial_quantity),
        reason: Set(Some(inventory_log::REASON_INITIAL_STOCK.to_string())),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(created.id)
}

fn sku_conflict() -> ServiceError {
    ServiceError::Conflict("SKU already exists".to_string())
}

/// A concurrent insert of the same SKU slips past the pre-check and is
/// caught by the unique index instead.
fn map_insert_error(err: DbErr) -> ServiceError {
    if ServiceError::is_unique_violation(&err) {
        warn!("Unique constraint rejected product insert: {}", err);
        sku_conflict()
    } else {
        error!("Failed to create product: {}", err);
        ServiceError::DatabaseError(err)
    }
}
