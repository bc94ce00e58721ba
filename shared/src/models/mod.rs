//! Data models
//!
//! Shared between the mock backend and the client (via API).
//! All IDs are strings as issued by the backend.

pub mod appointment;
pub mod notification;
pub mod professional;
pub mod review;
pub mod schedule;
pub mod service;
pub mod user;

// Re-exports
pub use appointment::*;
pub use notification::*;
pub use professional::*;
pub use review::*;
pub use schedule::*;
pub use service::*;
pub use user::*;
