use crate::{
    errors::ServiceError,
    handlers::{common::success_response, AppState},
};
use axum::{
    extract::{Path, State},
    response::Response,
};
use chrono::Utc;

/// Low-stock alerts across every warehouse of a company
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/alerts/low-stock",
    params(
        ("company_id" = i32, Path, description = "Company whose warehouses are inspected")
    ),
    responses(
        (status = 200, description = "Low-stock report; empty for unknown companies",
            body = crate::services::alerts::LowStockReport),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "Alerts"
)]
pub async fn low_stock_alerts(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
) -> Result<Response, ServiceError> {
    let report = state
        .services
        .alerts
        .low_stock_report(company_id, Utc::now())
        .await?;
    Ok(success_response(report))
}
