use crate::{
    db::DbPool,
    entities::{
        company::{self, Entity as Company},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

pub const DEMO_COMPANY_NAME: &str = "Demo Co";
pub const DEMO_WAREHOUSE_NAME: &str = "Main Warehouse";
pub const DEMO_WAREHOUSE_ADDRESS: &str = "123 Demo St";

/// Ids of the company/warehouse pair used for manual testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DemoFixture {
    pub company_id: i32,
    pub warehouse_id: i32,
}

#[derive(Clone)]
pub struct DemoService {
    db_pool: Arc<DbPool>,
}

impl DemoService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Returns the first company and its first warehouse, creating either
    /// one when missing. Calling it again yields the same ids.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<DemoFixture, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let company = match Company::find()
            .order_by_asc(company::Column::Id)
            .one(&txn)
            .await?
        {
            Some(existing) => existing,
            None => {
                info!("No company found; creating demo company");
                company::ActiveModel {
                    name: Set(DEMO_COMPANY_NAME.to_string()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        let warehouse = match Warehouse::find()
            .filter(warehouse::Column::CompanyId.eq(company.id))
            .order_by_asc(warehouse::Column::Id)
            .one(&txn)
            .await?
        {
            Some(existing) => existing,
            None => {
                info!(company_id = company.id, "No warehouse found; creating demo warehouse");
                warehouse::ActiveModel {
                    company_id: Set(company.id),
                    name: Set(DEMO_WAREHOUSE_NAME.to_string()),
                    address: Set(Some(DEMO_WAREHOUSE_ADDRESS.to_string())),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        Ok(DemoFixture {
            company_id: company.id,
            warehouse_id: warehouse.id,
        })
    }
}
