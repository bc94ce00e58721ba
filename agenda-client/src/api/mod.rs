//! Typed REST API client
//!
//! Every endpoint wrapper goes through [`ApiClient::call`], which decodes the
//! envelope strictly and applies the 401 policy: when a request made with a
//! token comes back unauthorized, the session is cleared and
//! [`SessionEvent::Expired`] is broadcast.

mod appointments;
mod auth;
mod notifications;
mod professionals;
mod services;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::User;
use tokio::sync::broadcast;

use crate::config::{Backend, ClientConfig};
use crate::http::{self, HttpClient, HttpRequest, NetworkHttpClient, Transport};
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

/// Route the UI navigates to when the session ends
pub const LOGIN_ROUTE: &str = "/login";

/// Session lifecycle broadcast
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(User),
    Updated(User),
    LoggedOut,
    /// The backend rejected the token; navigate to `redirect_to`
    Expired { redirect_to: String },
}

/// API client, cheap to clone
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Transport,
    session: SessionStore,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    pub fn new(transport: Transport, session: SessionStore) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            transport,
            session,
            events,
        }
    }

    /// Build the transport the configuration selects
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let session = SessionStore::new(config.session_file.clone(), config.session_ttl);
        let transport = match config.backend {
            Backend::Network => {
                Transport::Network(NetworkHttpClient::new(&config.base_url, config.timeout())?)
            }
            #[cfg(feature = "mock")]
            Backend::Mock => Transport::Mock(http::OneshotHttpClient::new(
                agenda_mock::MockState::with_fixtures().router(),
            )),
            #[cfg(not(feature = "mock"))]
            Backend::Mock => {
                return Err(ClientError::Config(
                    "mock backend requested but the `mock` feature is disabled".into(),
                ));
            }
        };
        tracing::info!(backend = ?config.backend, base_url = %config.base_url, "API client ready");
        Ok(Self::new(transport, session))
    }

    /// Client bound to an in-process router
    #[cfg(feature = "mock")]
    pub fn with_router(router: axum::Router, session: SessionStore) -> Self {
        Self::new(Transport::Mock(http::OneshotHttpClient::new(router)), session)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    pub async fn token(&self) -> Option<String> {
        self.transport.token().await
    }

    pub async fn set_token(&self, token: Option<String>) {
        self.transport.set_token(token).await;
    }

    /// Send a request and decode `data`
    pub async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> ClientResult<T> {
        let response = self.send(request).await?;
        let result = http::decode(&response);
        self.check_unauthorized(result).await
    }

    /// Send a request whose response carries no data
    pub async fn call_empty(&self, request: HttpRequest) -> ClientResult<()> {
        let response = self.send(request).await?;
        let result = http::decode_empty(&response);
        self.check_unauthorized(result).await
    }

    async fn send(&self, request: HttpRequest) -> ClientResult<http::HttpResponse> {
        let method = request.method.clone();
        let path = request.path.clone();
        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %path, status = response.status.as_u16(), "API response");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(%method, %path, error = %e, "API request failed");
                Err(e)
            }
        }
    }

    async fn check_unauthorized<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result
            && e.is_unauthorized()
            && self.transport.token().await.is_some()
        {
            self.expire_session().await;
        }
        result
    }

    async fn expire_session(&self) {
        tracing::warn!("Session rejected by the backend, signing out");
        if let Err(e) = self.session.clear().await {
            tracing::error!(error = %e, "Failed to clear session cookie");
        }
        self.transport.set_token(None).await;
        self.emit(SessionEvent::Expired {
            redirect_to: LOGIN_ROUTE.to_string(),
        });
    }

    // ---- request helpers ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(HttpRequest::get(path)).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.call(HttpRequest::get(path).with_query(query)?).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(HttpRequest::new(::http::Method::POST, path).with_json(body)?).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> ClientResult<()> {
        self.call_empty(HttpRequest::new(::http::Method::POST, path)).await
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(HttpRequest::new(::http::Method::PATCH, path).with_json(body)?).await
    }

    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(HttpRequest::new(::http::Method::PATCH, path)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        self.call_empty(HttpRequest::delete(path)).await
    }
}
