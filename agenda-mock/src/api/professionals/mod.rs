//! Professional directory, reviews and availability API

mod handler;

use axum::Router;
use axum::routing::{get, patch};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/professionals/", get(handler::list))
        .route("/professionals/featured/", get(handler::featured))
        .route("/professionals/profile/", patch(handler::update_own))
        .route("/professionals/{id}/", get(handler::get_by_id))
        .route(
            "/professionals/{id}/reviews/",
            get(handler::list_reviews).post(handler::create_review),
        )
        .route("/professionals/{id}/availability/", get(handler::availability))
}
