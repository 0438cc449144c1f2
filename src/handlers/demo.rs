use crate::{
    errors::ServiceError,
    handlers::{common::success_response, AppState},
};
use axum::{extract::State, response::Response};

/// Ensure a demo company and warehouse exist and return their ids
#[utoipa::path(
    post,
    path = "/init-demo",
    responses(
        (status = 200, description = "Demo fixture ids", body = crate::services::demo::DemoFixture),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "Demo"
)]
pub async fn init_demo(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let fixture = state.services.demo.bootstrap().await?;
    Ok(success_response(fixture))
}
