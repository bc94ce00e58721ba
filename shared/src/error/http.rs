//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ProfessionalNotFound
            | Self::ServiceNotFound
            | Self::ScheduleBlockNotFound
            | Self::AppointmentNotFound
            | Self::NotificationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::EmailAlreadyRegistered
            | Self::InvalidStatusTransition
            | Self::SlotUnavailable => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::ProfessionalRequired => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
