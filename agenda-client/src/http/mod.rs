//! HTTP transport
//!
//! Transports move raw requests and bytes; envelope decoding happens once in
//! [`decode`] so both transports fail the same way on a malformed body.

pub mod network;
#[cfg(feature = "mock")]
pub mod oneshot;

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiResponse;

use crate::{ClientError, ClientResult};

pub use network::NetworkHttpClient;
#[cfg(feature = "mock")]
pub use oneshot::OneshotHttpClient;

/// A request relative to the API base URL
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Path with leading and trailing slash, e.g. `/professionals/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Flatten a serializable struct into query pairs
    ///
    /// `None` fields are skipped and lists are comma joined.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> ClientResult<Self> {
        let value = serde_json::to_value(query)?;
        let Value::Object(map) = value else {
            return Err(ClientError::Internal(
                "query parameters must serialize to an object".into(),
            ));
        };
        for (key, value) in map {
            if let Some(text) = query_value(&value) {
                self.query.push((key, text));
            }
        }
        Ok(self)
    }

    /// `path?query` with the query percent-encoded
    pub fn path_and_query(&self) -> ClientResult<String> {
        if self.query.is_empty() {
            return Ok(self.path.clone());
        }
        let url = reqwest::Url::parse_with_params("http://localhost/", &self.query)
            .map_err(|e| ClientError::Internal(format!("Invalid query: {}", e)))?;
        Ok(format!("{}?{}", self.path, url.query().unwrap_or_default()))
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(query_value).collect();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        Value::Object(_) => None,
    }
}

/// Raw transport response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// HTTP transport trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
    async fn set_token(&self, token: Option<String>);
    async fn token(&self) -> Option<String>;
}

/// Runtime-selected transport
#[derive(Debug, Clone)]
pub enum Transport {
    Network(NetworkHttpClient),
    #[cfg(feature = "mock")]
    Mock(OneshotHttpClient),
}

#[async_trait]
impl HttpClient for Transport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        match self {
            Self::Network(c) => c.send(request).await,
            #[cfg(feature = "mock")]
            Self::Mock(c) => c.send(request).await,
        }
    }

    async fn set_token(&self, token: Option<String>) {
        match self {
            Self::Network(c) => c.set_token(token).await,
            #[cfg(feature = "mock")]
            Self::Mock(c) => c.set_token(token).await,
        }
    }

    async fn token(&self) -> Option<String> {
        match self {
            Self::Network(c) => c.token().await,
            #[cfg(feature = "mock")]
            Self::Mock(c) => c.token().await,
        }
    }
}

/// Decode an envelope that must carry `data`
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ClientResult<T> {
    let envelope: ApiResponse<T> = decode_envelope(response)?;
    envelope
        .data
        .ok_or_else(|| ClientError::InvalidResponse("missing data in response".into()))
}

/// Decode an envelope whose `data` is irrelevant
pub fn decode_empty(response: &HttpResponse) -> ClientResult<()> {
    let _: ApiResponse<Value> = decode_envelope(response)?;
    Ok(())
}

fn decode_envelope<T: DeserializeOwned>(response: &HttpResponse) -> ClientResult<ApiResponse<T>> {
    if !response.status.is_success() {
        return Err(error_from_response(response));
    }
    let envelope: ApiResponse<T> = serde_json::from_slice(&response.body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))?;
    if !envelope.is_success() {
        return Err(ClientError::Api {
            code: envelope.code.unwrap_or_default(),
            message: envelope.message,
            details: envelope.details,
        });
    }
    Ok(envelope)
}

fn error_from_response(response: &HttpResponse) -> ClientError {
    let envelope = serde_json::from_slice::<ApiResponse<Value>>(&response.body).ok();
    let text = match &envelope {
        Some(e) => e.message.clone(),
        None => String::from_utf8_lossy(&response.body).to_string(),
    };

    if response.status == StatusCode::UNAUTHORIZED {
        return ClientError::Unauthorized(text);
    }

    if let Some(envelope) = envelope
        && let Some(code) = envelope.code.filter(|c| *c != 0)
    {
        return ClientError::Api {
            code,
            message: envelope.message,
            details: envelope.details,
        };
    }

    match response.status {
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::validation(text),
        _ => ClientError::Internal(format!("HTTP {}: {}", response.status.as_u16(), text)),
    }
}
