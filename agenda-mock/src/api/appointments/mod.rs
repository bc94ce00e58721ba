//! Appointment API

mod handler;

use axum::Router;
use axum::routing::{get, patch};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/appointments/", get(handler::list).post(handler::create))
        .route(
            "/appointments/{id}/",
            get(handler::get_by_id).patch(handler::update_status),
        )
        .route("/appointments/{id}/cancel/", patch(handler::cancel))
        .route("/professionals/appointments/", get(handler::list_for_professional))
}
