//! Authentication and profile API

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::MockState;

pub fn router() -> Router<MockState> {
    Router::new()
        .route("/auth/login/", post(handler::login))
        .route("/auth/register/", post(handler::register))
        .route("/profile/", get(handler::profile).patch(handler::update_profile))
}
