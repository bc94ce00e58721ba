//! API Response types
//!
//! Every response body of the backend follows one envelope:
//! ```json
//! {
//!     "code": 0,
//!     "message": "OK",
//!     "data": { ... }
//! }
//! ```
//! Lists are wrapped as `data: { "items": [...], "pagination": {...} }`.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (present on success)
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(0),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    /// Whether the envelope reports success (absent code counts as success)
    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.is_success() {
            http::StatusCode::OK
        } else {
            ErrorCode::try_from(self.code.unwrap_or(1))
                .map(|c| c.http_status())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page as u64) as u32
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Paginated list payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(page, per_page, total),
        }
    }

    /// Slice a full result set into the requested 1-based page
    pub fn paginate(all: Vec<T>, page: u32, per_page: u32) -> Self {
        let total = all.len() as u64;
        let page = page.max(1);
        let skip = ((page - 1) as usize).saturating_mul(per_page as usize);
        let items = all.into_iter().skip(skip).take(per_page as usize).collect();
        Self::new(items, page, per_page, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_pages() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert_eq!(Pagination::new(1, 0, 25).total_pages, 0);
        assert!(!Pagination::new(3, 10, 25).has_next());
    }

    #[test]
    fn test_paginate_slices_in_order() {
        let page = Page::paginate((1..=7).collect::<Vec<_>>(), 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.pagination.total, 7);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = AppError::new(ErrorCode::SlotUnavailable);
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["code"], 4003);
        assert_eq!(json["message"], "Time slot is no longer available");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_missing_data_decodes_to_none() {
        let resp: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"code":0,"message":"OK"}"#).unwrap();
        assert!(resp.is_success());
        assert!(resp.data.is_none());
    }
}
