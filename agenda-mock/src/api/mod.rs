//! REST routes of the mock backend
//!
//! Paths are relative to the `/api` prefix and end with a slash.

pub mod appointments;
pub mod auth;
pub mod notifications;
pub mod professionals;
pub mod services;

use axum::{Json, Router};
use shared::error::{AppError, AppResult};
use shared::response::ApiResponse;
use validator::Validate;

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .merge(auth::router())
        .merge(professionals::router())
        .merge(services::router())
        .merge(appointments::router())
        .merge(notifications::router())
}

/// Wrap `data` in the success envelope
pub(crate) fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

pub(crate) fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|errors| AppError::from_validation(&errors))
}

/// Validation error pointing at one field
pub(crate) fn invalid_field(field: &str, message: &str) -> AppError {
    AppError::validation("Validation failed").with_detail(field, message)
}
