use super::Query;
use crate::{
    entities::{inventory, product, product_supplier, sales_order, sales_order_item, supplier, warehouse},
    errors::ServiceError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{self, Alias, Expr, Func, JoinType, Order, SelectStatement},
    ConnectionTrait, DatabaseConnection, FromQueryResult,
};
use tracing::debug;

const WINDOW_SALES: &str = "window_sales";
const FIRST_SUPPLIER: &str = "first_supplier";
const UNITS_SOLD: &str = "units_sold";

/// One inventory row of the company together with the product's windowed
/// company-wide sales and its lowest-id supplier, if any.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct LowStockRow {
    pub warehouse_id: i32,
    pub warehouse_name: String,
    pub inventory_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub sku: String,
    pub low_stock_threshold: Option<i32>,
    pub current_stock: i32,
    pub units_sold: i64,
    pub supplier_id: Option<i32>,
    pub supplier_name: Option<String>,
    pub supplier_contact_email: Option<String>,
}

/// Candidate rows for the low-stock report of one company.
///
/// Inventory rows whose product sold nothing in the window are dropped by the
/// inner join on the sales aggregate. Threshold filtering is left to the caller.
#[derive(Debug, Clone)]
pub struct LowStockCandidatesQuery {
    pub company_id: i32,
    pub window_start: DateTime<Utc>,
}

impl LowStockCandidatesQuery {
    pub fn new(company_id: i32, window_start: DateTime<Utc>) -> Self {
        Self {
            company_id,
            window_start,
        }
    }

    /// SUM(quantity) per product over the company's orders inside the window
    fn window_sales(&self) -> SelectStatement {
        sea_query::Query::select()
            .column((sales_order_item::Entity, sales_order_item::Column::ProductId))
            .expr_as(
                Func::sum(Expr::col((
                    sales_order_item::Entity,
                    sales_order_item::Column::Quantity,
                ))),
                Alias::new(UNITS_SOLD),
            )
            .from(sales_order_item::Entity)
            .inner_join(
                sales_order::Entity,
                Expr::col((sales_order::Entity, sales_order::Column::Id)).equals((
                    sales_order_item::Entity,
                    sales_order_item::Column::SalesOrderId,
                )),
            )
            .and_where(
                Expr::col((sales_order::Entity, sales_order::Column::CompanyId))
                    .eq(self.company_id),
            )
            .and_where(
                Expr::col((sales_order::Entity, sales_order::Column::CreatedAt))
                    .gte(self.window_start),
            )
            .group_by_col((sales_order_item::Entity, sales_order_item::Column::ProductId))
            .to_owned()
    }

    /// MIN(supplier_id) per product
    fn first_supplier() -> SelectStatement {
        sea_query::Query::select()
            .column(product_supplier::Column::ProductId)
            .expr_as(
                Func::min(Expr::col(product_supplier::Column::SupplierId)),
                product_supplier::Column::SupplierId,
            )
            .from(product_supplier::Entity)
            .group_by_col(product_supplier::Column::ProductId)
            .to_owned()
    }

    pub fn statement(&self) -> SelectStatement {
        let window_sales = Alias::new(WINDOW_SALES);
        let first_supplier = Alias::new(FIRST_SUPPLIER);

        sea_query::Query::select()
            .expr_as(
                Expr::col((warehouse::Entity, warehouse::Column::Id)),
                Alias::new("warehouse_id"),
            )
            .expr_as(
                Expr::col((warehouse::Entity, warehouse::Column::Name)),
                Alias::new("warehouse_name"),
            )
            .expr_as(
                Expr::col((inventory::Entity, inventory::Column::Id)),
                Alias::new("inventory_id"),
            )
            .expr_as(
                Expr::col((product::Entity, product::Column::Id)),
                Alias::new("product_id"),
            )
            .expr_as(
                Expr::col((product::Entity, product::Column::Name)),
                Alias::new("product_name"),
            )
            .expr_as(
                Expr::col((product::Entity, product::Column::Sku)),
                Alias::new("sku"),
            )
            .expr_as(
                Expr::col((product::Entity, product::Column::LowStockThreshold)),
                Alias::new("low_stock_threshold"),
            )
            .expr_as(
                Expr::col((inventory::Entity, inventory::Column::Quantity)),
                Alias::new("current_stock"),
            )
            .expr_as(
                Expr::col((window_sales.clone(), Alias::new(UNITS_SOLD))),
                Alias::new(UNITS_SOLD),
            )
            .expr_as(
                Expr::col((supplier::Entity, supplier::Column::Id)),
                Alias::new("supplier_id"),
            )
            .expr_as(
                Expr::col((supplier::Entity, supplier::Column::Name)),
                Alias::new("supplier_name"),
            )
            .expr_as(
                Expr::col((supplier::Entity, supplier::Column::ContactEmail)),
                Alias::new("supplier_contact_email"),
            )
            .from(warehouse::Entity)
            .inner_join(
                inventory::Entity,
                Expr::col((inventory::Entity, inventory::Column::WarehouseId))
                    .equals((warehouse::Entity, warehouse::Column::Id)),
            )
            .inner_join(
                product::Entity,
                Expr::col((product::Entity, product::Column::Id))
                    .equals((inventory::Entity, inventory::Column::ProductId)),
            )
            .join_subquery(
                JoinType::InnerJoin,
                self.window_sales(),
                window_sales.clone(),
                Expr::col((window_sales, sales_order_item::Column::ProductId))
                    .equals((product::Entity, product::Column::Id)),
            )
            .join_subquery(
                JoinType::LeftJoin,
                Self::first_supplier(),
                first_supplier.clone(),
                Expr::col((first_supplier.clone(), product_supplier::Column::ProductId))
                    .equals((product::Entity, product::Column::Id)),
            )
            .left_join(
                supplier::Entity,
                Expr::col((supplier::Entity, supplier::Column::Id))
                    .equals((first_supplier, product_supplier::Column::SupplierId)),
            )
            .and_where(
                Expr::col((warehouse::Entity, warehouse::Column::CompanyId)).eq(self.company_id),
            )
            .order_by((warehouse::Entity, warehouse::Column::Id), Order::Asc)
            .order_by((inventory::Entity, inventory::Column::Id), Order::Asc)
            .to_owned()
    }
}

#[async_trait]
impl Query for LowStockCandidatesQuery {
    type Result = Vec<LowStockRow>;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let stmt = db_pool.get_database_backend().build(&self.statement());
        debug!(sql = ?stmt, "Running low-stock candidate query");

        let rows = LowStockRow::find_by_statement(stmt).all(db_pool).await?;
        Ok(rows)
    }
}
