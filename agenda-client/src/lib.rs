//! Agenda Livre client
//!
//! Typed API client plus the client-side stores of the booking marketplace:
//! session and auth, directory filters, professional page, booking wizard,
//! appointment board, notifications and toasts.

pub mod api;
pub mod app;
pub mod appointments;
pub mod auth;
pub mod booking;
pub mod calendar;
pub mod config;
pub mod directory;
pub mod error;
pub mod format;
pub mod http;
pub mod logger;
pub mod notifications;
pub mod professional;
pub mod session;
pub mod toast;

pub use api::{ApiClient, SessionEvent};
pub use app::AgendaApp;
pub use config::{Backend, ClientConfig};
pub use error::{ClientError, ClientResult};

// Re-export shared types for convenience
pub use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
pub use shared::{ApiResponse, Page};
