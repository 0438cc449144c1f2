//! Health endpoint: reports process liveness and whether storage answers a ping.

use crate::{db, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
    Degraded,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    /// `up` when storage answers, `degraded` otherwise
    pub status: HealthStatus,
    /// Storage status: `up` or `down`
    pub database: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthInfo {
    fn from_database(database: HealthStatus) -> Self {
        let status = match database {
            HealthStatus::Up => HealthStatus::Up,
            _ => HealthStatus::Degraded,
        };
        Self {
            status,
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Service health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthInfo)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match db::check_connection(&state.db).await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            warn!("Health check could not reach the database: {}", e);
            HealthStatus::Down
        }
    };

    (StatusCode::OK, Json(HealthInfo::from_database(database)))
}
