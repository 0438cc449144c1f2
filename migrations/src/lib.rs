pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_companies_table;
mod m20240601_000002_create_warehouses_table;
mod m20240601_000003_create_catalog_tables;
mod m20240601_000004_create_inventory_tables;
mod m20240601_000005_create_sales_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_companies_table::Migration),
            Box::new(m20240601_000002_create_warehouses_table::Migration),
            Box::new(m20240601_000003_create_catalog_tables::Migration),
            Box::new(m20240601_000004_create_inventory_tables::Migration),
            Box::new(m20240601_000005_create_sales_tables::Migration),
        ]
    }
}
