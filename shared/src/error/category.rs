//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Professional / directory errors (3xxx)
    Professional,
    /// Appointment errors (4xxx)
    Appointment,
    /// Notification errors (7xxx)
    Notification,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Professional,
            4000..5000 => Self::Appointment,
            7000..8000 => Self::Notification,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Professional => "professional",
            Self::Appointment => "appointment",
            Self::Notification => "notification",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Professional);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Appointment);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Notification);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::InvalidStatusTransition.category(),
            ErrorCategory::Appointment
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Notification).unwrap();
        assert_eq!(json, "\"notification\"");
        assert_eq!(ErrorCategory::Professional.name(), "professional");
    }
}
