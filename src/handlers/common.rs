use crate::errors::ServiceError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Malformed or mistyped JSON bodies are client errors
pub fn map_json_rejection(rejection: JsonRejection) -> ServiceError {
    ServiceError::ValidationError(format!("Invalid JSON body: {}", rejection.body_text()))
}
