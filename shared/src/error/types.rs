//! Application error type

use super::codes::ErrorCode;
use crate::response::ApiResponse;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type on the backend side of the contract:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level errors, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn token_invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Build a validation error carrying one detail entry per failing field
    pub fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let mut err = Self::validation("Validation failed");
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            err = err.with_detail(field.to_string(), messages.join(", "));
        }
        err
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::AppointmentNotFound);
        assert_eq!(err.code, ErrorCode::AppointmentNotFound);
        assert_eq!(err.message, "Appointment not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "email")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_not_found_carries_resource() {
        let err = AppError::not_found("Professional 42");
        assert_eq!(err.message, "Professional 42 not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[derive(Validate)]
    struct Form {
        #[validate(email(message = "invalid email"))]
        email: String,
    }

    #[test]
    fn test_from_validation_lists_fields() {
        let form = Form {
            email: "not-an-email".into(),
        };
        let errors = form.validate().unwrap_err();
        let err = AppError::from_validation(&errors);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap().get("email").unwrap(), "invalid email");
    }
}
