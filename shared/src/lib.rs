//! Shared types for Agenda Livre
//!
//! Domain models, the unified error system, the response envelope and
//! the pure filter composition used by both the client and the mock backend.

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::{ApiResponse, Page, Pagination};
