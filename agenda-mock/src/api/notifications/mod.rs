//! Notification API

mod handler;

use axum::Router;
use axum::routing::{delete, get, patch, post};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/notifications/", get(handler::list).post(handler::create))
        .route("/notifications/mark-all-read/", post(handler::mark_all_read))
        .route("/notifications/{id}/read/", patch(handler::mark_read))
        .route("/notifications/{id}/", delete(handler::delete))
}
