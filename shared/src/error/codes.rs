//! Unified error codes for Agenda Livre
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Professional / directory errors
//! - 4xxx: Appointment errors
//! - 7xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email already registered
    EmailAlreadyRegistered = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Only professionals may perform this action
    ProfessionalRequired = 2002,

    // ==================== 3xxx: Professional ====================
    /// Professional not found
    ProfessionalNotFound = 3001,
    /// Service not found
    ServiceNotFound = 3002,
    /// Service is not offered by this professional
    ServiceNotOffered = 3003,
    /// Professional does not offer home service
    HomeServiceUnavailable = 3004,
    /// Schedule block not found
    ScheduleBlockNotFound = 3005,

    // ==================== 4xxx: Appointment ====================
    /// Appointment not found
    AppointmentNotFound = 4001,
    /// Requested status transition is not allowed
    InvalidStatusTransition = 4002,
    /// Time slot is no longer available
    SlotUnavailable = 4003,
    /// Appointment is in the past
    AppointmentInPast = 4004,

    // ==================== 7xxx: Notification ====================
    /// Notification not found
    NotificationNotFound = 7001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ProfessionalRequired => "Only professionals can perform this action",

            // Professional
            ErrorCode::ProfessionalNotFound => "Professional not found",
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::ServiceNotOffered => "Service is not offered by this professional",
            ErrorCode::HomeServiceUnavailable => "Professional does not offer home service",
            ErrorCode::ScheduleBlockNotFound => "Schedule block not found",

            // Appointment
            ErrorCode::AppointmentNotFound => "Appointment not found",
            ErrorCode::InvalidStatusTransition => "Appointment status transition not allowed",
            ErrorCode::SlotUnavailable => "Time slot is no longer available",
            ErrorCode::AppointmentInPast => "Appointment date is in the past",

            // Notification
            ErrorCode::NotificationNotFound => "Notification not found",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::EmailAlreadyRegistered),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ProfessionalRequired),

            // Professional
            3001 => Ok(ErrorCode::ProfessionalNotFound),
            3002 => Ok(ErrorCode::ServiceNotFound),
            3003 => Ok(ErrorCode::ServiceNotOffered),
            3004 => Ok(ErrorCode::HomeServiceUnavailable),
            3005 => Ok(ErrorCode::ScheduleBlockNotFound),

            // Appointment
            4001 => Ok(ErrorCode::AppointmentNotFound),
            4002 => Ok(ErrorCode::InvalidStatusTransition),
            4003 => Ok(ErrorCode::SlotUnavailable),
            4004 => Ok(ErrorCode::AppointmentInPast),

            // Notification
            7001 => Ok(ErrorCode::NotificationNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ProfessionalNotFound.code(), 3001);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 4002);
        assert_eq!(ErrorCode::NotificationNotFound.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::AppointmentNotFound));
        assert_eq!(ErrorCode::try_from(1002), Ok(ErrorCode::InvalidCredentials));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(5001), Err(InvalidErrorCode(5001)));
        assert_eq!(
            InvalidErrorCode(4999).to_string(),
            "invalid error code: 4999"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::SlotUnavailable).unwrap();
        assert_eq!(json, "4003");

        let code: ErrorCode = serde_json::from_str("4004").unwrap();
        assert_eq!(code, ErrorCode::AppointmentInPast);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_every_code_roundtrips_through_u16() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::InvalidRequest,
            ErrorCode::EmailAlreadyRegistered,
            ErrorCode::ProfessionalRequired,
            ErrorCode::ScheduleBlockNotFound,
            ErrorCode::AppointmentInPast,
            ErrorCode::NotificationNotFound,
            ErrorCode::InternalError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
