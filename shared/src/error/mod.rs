//! Unified error system for Agenda Livre
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//! use shared::response::ApiResponse;
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format")
//!     .with_detail("field", "email");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
