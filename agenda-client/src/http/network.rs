// agenda-client/src/http/network.rs
// Network transport over reqwest

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;

use super::{HttpClient, HttpRequest, HttpResponse};
use crate::ClientResult;

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let url = self.url(&request.path);
        let mut req = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = self.token.read().await.as_deref() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = request.body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        tracing::debug!(method = %request.method, url = %url, "Sending request");
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
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

    #[test]
    fn test_url_joining() {
        let client =
            NetworkHttpClient::new("http://localhost:8000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.url("/professionals/"),
            "http://localhost:8000/api/professionals/"
        );
    }

    #[tokio::test]
    async fn test_token_is_shared_between_clones() {
        let client =
            NetworkHttpClient::new("http://localhost:8000/api", Duration::from_secs(5)).unwrap();
        let other = client.clone();
        client.set_token(Some("abc".into())).await;
        assert_eq!(other.token().await.as_deref(), Some("abc"));
    }
}
