pub mod alerts;
pub mod common;
pub mod demo;
pub mod products;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{
        alerts::{AlertPolicy, LowStockAlertService},
        demo::DemoService,
        products::ProductService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub alerts: Arc<LowStockAlertService>,
    pub demo: Arc<DemoService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            products: Arc::new(ProductService::new(db_pool.clone())),
            alerts: Arc::new(LowStockAlertService::new(
                db_pool.clone(),
                AlertPolicy::from_config(config),
            )),
            demo: Arc::new(DemoService::new(db_pool)),
        }
    }
}
