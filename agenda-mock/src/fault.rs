//! Request log and one-shot failure injection

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use shared::error::AppError;
use shared::response::ApiResponse;

use crate::state::MockState;

/// Fail the next request matching method and path prefix
#[derive(Debug, Clone)]
pub struct FaultRule {
    pub method: Method,
    pub path_prefix: String,
    pub status: StatusCode,
}

impl FaultRule {
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        &self.method == method && path.starts_with(&self.path_prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: Method,
    pub path: String,
}

/// Log every request, then answer from a pending fault rule if one matches
pub async fn intercept(State(state): State<MockState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    state.record(method.clone(), path.clone());

    if let Some(status) = state.take_fault(&method, &path) {
        tracing::info!(%method, %path, %status, "Injected failure");
        return injected(status);
    }
    next.run(req).await
}

fn injected(status: StatusCode) -> Response {
    let err = match status {
        StatusCode::UNAUTHORIZED => AppError::not_authenticated(),
        StatusCode::FORBIDDEN => AppError::permission_denied("Injected failure"),
        StatusCode::NOT_FOUND => AppError::not_found("Injected failure"),
        _ => AppError::internal("Injected failure"),
    };
    (status, Json(ApiResponse::<()>::error(&err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_matches_method_and_prefix() {
        let rule = FaultRule {
            method: Method::PATCH,
            path_prefix: "/appointments/".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(rule.matches(&Method::PATCH, "/appointments/apt-1/"));
        assert!(!rule.matches(&Method::GET, "/appointments/apt-1/"));
        assert!(!rule.matches(&Method::PATCH, "/notifications/n1/read/"));
    }

    #[test]
    fn test_rules_are_consumed_once() {
        let state = MockState::with_fixtures();
        state.fail_next(Method::POST, "/appointments/", StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            state.take_fault(&Method::POST, "/appointments/"),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(state.take_fault(&Method::POST, "/appointments/"), None);
    }
}
