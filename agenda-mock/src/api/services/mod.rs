//! Service catalogue and schedule block API

mod handler;

use axum::Router;
use axum::routing::{delete, get, patch, post};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route(
            "/professionals/{id}/services/",
            get(handler::list).post(handler::add_to_professional),
        )
        .route("/services/", post(handler::create))
        .route("/services/{id}/", patch(handler::update).delete(handler::delete))
        .route(
            "/professionals/blocks/",
            get(handler::list_blocks).post(handler::create_block),
        )
        .route("/professionals/blocks/{id}/", delete(handler::delete_block))
}
