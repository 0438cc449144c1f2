use crate::{
    config::AppConfig,
    db::DbPool,
    errors::ServiceError,
    queries::{LowStockCandidatesQuery, LowStockRow, Query},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Projected days until a product at `quantity` runs out when it sold
/// `units_sold` over the last `window_days` days.
///
/// Returns `None` when nothing sold, i.e. there is no consumption rate.
pub fn days_until_stockout(quantity: i32, units_sold: i64, window_days: u32) -> Option<i64> {
    if units_sold <= 0 || window_days == 0 {
        return None;
    }
    let daily_rate = units_sold as f64 / f64::from(window_days);
    Some((f64::from(quantity) / daily_rate).floor() as i64)
}

/// Threshold and window rules applied to every candidate row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    pub window_days: u32,
    pub default_threshold: i32,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            window_days: 30,
            default_threshold: crate::entities::product::DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl AlertPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            window_days: config.low_stock_window_days,
            default_threshold: config.default_low_stock_threshold,
        }
    }

    /// Oldest order timestamp still counted as recent demand
    pub fn window_start(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        as_of - Duration::days(i64::from(self.window_days))
    }

    /// Unset and zero thresholds fall back to the default
    pub fn effective_threshold(&self, stored: Option<i32>) -> i32 {
        match stored {
            Some(threshold) if threshold > 0 => threshold,
            _ => self.default_threshold,
        }
    }

    /// Returns the threshold and stockout estimate when the row should alert.
    pub fn assess(
        &self,
        current_stock: i32,
        stored_threshold: Option<i32>,
        units_sold: i64,
    ) -> Option<(i32, Option<i64>)> {
        let threshold = self.effective_threshold(stored_threshold);
        if units_sold <= 0 || current_stock >= threshold {
            return None;
        }
        Some((
            threshold,
            days_until_stockout(current_stock, units_sold, self.window_days),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SupplierSummary {
    pub id: i32,
    pub name: String,
    pub contact_email: Option<String>,
}

/// A product running low in one warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LowStockAlert {
    pub product_id: i32,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i32,
    pub warehouse_name: String,
    pub current_stock: i32,
    pub threshold: i32,
    /// Naive projection from company-wide sales; `null` when there is no rate
    pub days_until_stockout: Option<i64>,
    pub supplier: Option<SupplierSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LowStockReport {
    pub alerts: Vec<LowStockAlert>,
    pub total_alerts: usize,
}

impl LowStockReport {
    pub fn new(alerts: Vec<LowStockAlert>) -> Self {
        Self {
            total_alerts: alerts.len(),
            alerts,
        }
    }
}

impl LowStockAlert {
    fn from_row(row: LowStockRow, threshold: i32, days_until_stockout: Option<i64>) -> Self {
        let supplier = match (row.supplier_id, row.supplier_name) {
            (Some(id), Some(name)) => Some(SupplierSummary {
                id,
                name,
                contact_email: row.supplier_contact_email,
            }),
            _ => None,
        };

        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            sku: row.sku,
            warehouse_id: row.warehouse_id,
            warehouse_name: row.warehouse_name,
            current_stock: row.current_stock,
            threshold,
            days_until_stockout,
            supplier,
        }
    }
}

/// Builds the report from candidate rows, keeping their order
pub fn build_report(policy: &AlertPolicy, rows: Vec<LowStockRow>) -> LowStockReport {
    let alerts = rows
        .into_iter()
        .filter_map(|row| {
            let (threshold, days) =
                policy.assess(row.current_stock, row.low_stock_threshold, row.units_sold)?;
            Some(LowStockAlert::from_row(row, threshold, days))
        })
        .collect();
    LowStockReport::new(alerts)
}

/// Service producing the per-company low-stock report
#[derive(Clone)]
pub struct LowStockAlertService {
    db_pool: Arc<DbPool>,
    policy: AlertPolicy,
}

impl LowStockAlertService {
    pub fn new(db_pool: Arc<DbPool>, policy: AlertPolicy) -> Self {
        Self { db_pool, policy }
    }

    pub fn policy(&self) -> AlertPolicy {
        self.policy
    }

    /// Low-stock alerts for every warehouse of `company_id`, as of `as_of`.
    /// An unknown company yields an empty report.
    #[instrument(skip(self))]
    pub async fn low_stock_report(
        &self,
        company_id: i32,
        as_of: DateTime<Utc>,
    ) -> Result<LowStockReport, ServiceError> {
        let query = LowStockCandidatesQuery::new(company_id, self.policy.window_start(as_of));
        let rows = query.execute(&self.db_pool).await?;
        let candidates = rows.len();

        let report = build_report(&self.policy, rows);
        info!(
            candidates,
            total_alerts = report.total_alerts,
            "Low-stock report computed"
        );
        Ok(report)
    }
}
