//! Agenda Livre mock backend
//!
//! In-memory implementation of the REST API the client talks to. Used as the
//! development server (`agenda-mock` binary) and, through
//! [`MockState::router`], as an in-process backend in tests.

pub mod api;
pub mod auth;
pub mod fault;
pub mod fixtures;
pub mod state;

use axum::{Router, middleware};
use tower::limit::ConcurrencyLimitLayer;

pub use fault::{FaultRule, RequestRecord};
pub use state::{Account, DEFAULT_JWT_SECRET, MockData, MockState};

/// All routes, without the `/api` prefix
pub fn router(state: MockState) -> Router {
    api::router()
        .layer(middleware::from_fn_with_state(state.clone(), fault::intercept))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}
