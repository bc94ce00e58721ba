// agenda-client/src/http/oneshot.rs
// In-process transport: calls the mock Router directly
//
// Requires the "mock" feature

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use tokio::sync::RwLock;
use tower::ServiceExt;

use super::{HttpClient, HttpRequest, HttpResponse};
use crate::{ClientError, ClientResult};

/// Oneshot HTTP client (in-memory calls)
///
/// Uses the Tower `oneshot` pattern to call a Router directly, with no
/// network involved.
///
/// # Example
///
/// ```ignore
/// let router = agenda_mock::MockState::with_fixtures().router();
/// let client = OneshotHttpClient::new(router);
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Arc<RwLock<Option<String>>>,
}

impl OneshotHttpClient {
    /// `router` must already have its state applied
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: Arc::new(RwLock::new(None)),
        }
    }

    async fn build_request(&self, request: HttpRequest) -> ClientResult<Request<Body>> {
        let uri = request.path_and_query()?;
        let mut builder = Request::builder().method(request.method).uri(uri);

        if let Some(token) = self.token.read().await.as_deref() {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = match request.body {
            Some(bytes) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let request = self.build_request(request).await?;
        tracing::debug!(method = %request.method(), uri = %request.uri(), "Oneshot request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }

    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use http::StatusCode;

    #[tokio::test]
    async fn test_oneshot_round_trip() {
        let router: Router = Router::new().route(
            "/ping/",
            get(|headers: http::HeaderMap| async move {
                headers
                    .get(http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("none")
                    .to_string()
            }),
        );
        let client = OneshotHttpClient::new(router);

        let response = client.send(HttpRequest::get("/ping/")).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"none");

        client.set_token(Some("t0k3n".into())).await;
        let response = client.send(HttpRequest::get("/ping/")).await.unwrap();
        assert_eq!(response.body, b"Bearer t0k3n");

        let response = client.send(HttpRequest::get("/missing/")).await.unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
