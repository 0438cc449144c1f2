use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_companies_table::Companies;
use crate::m20240601_000003_create_catalog_tables::Products;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240601_000005_create_sales_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SalesOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalesOrders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SalesOrders::CompanyId).integer().not_null())
                    .col(
                        ColumnDef::new(SalesOrders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_orders_company_id")
                            .from(SalesOrders::Table, SalesOrders::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The low-stock report filters on (company_id, created_at)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_orders_company_created_at")
                    .table(SalesOrders::Table)
                    .col(SalesOrders::CompanyId)
                    .col(SalesOrders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalesOrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalesOrderItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SalesOrderItems::SalesOrderId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalesOrderItems::ProductId).integer().not_null())
                    .col(ColumnDef::new(SalesOrderItems::Quantity).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_order_items_sales_order_id")
                            .from(SalesOrderItems::Table, SalesOrderItems::SalesOrderId)
                            .to(SalesOrders::Table, SalesOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_order_items_product_id")
                            .from(SalesOrderItems::Table, SalesOrderItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_order_items_product_id")
                    .table(SalesOrderItems::Table)
                    .col(SalesOrderItems::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SalesOrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SalesOrders {
    Table,
    Id,
    CompanyId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum SalesOrderItems {
    Table,
    Id,
    SalesOrderId,
    ProductId,
    Quantity,
}
