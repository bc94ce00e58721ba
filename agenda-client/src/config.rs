//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::{ClientError, ClientResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Which backend the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Real REST backend over the network
    #[default]
    Network,
    /// In-memory mock router, used in development and tests
    Mock,
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Backend selection
    pub backend: Backend,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Session cookie file; `None` keeps the session in memory only
    pub session_file: Option<PathBuf>,

    /// Auto-dismiss delay of toasts
    pub toast_ttl: Duration,

    /// Lifetime of a persisted session
    pub session_ttl: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            backend: Backend::Network,
            timeout_secs: 30,
            session_file: None,
            toast_ttl: Duration::from_secs(5),
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Configuration for the in-process mock backend
    pub fn mock() -> Self {
        Self::new(DEFAULT_API_URL).with_backend(Backend::Mock)
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toast_ttl = ttl;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    ///
    /// `AGENDA_API_URL` falls back to `NEXT_PUBLIC_API_URL`, `AGENDA_ENV` to
    /// `NODE_ENV`; the value `development` selects the mock backend.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("AGENDA_API_URL")
            .or_else(|| lookup("NEXT_PUBLIC_API_URL"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let env = lookup("AGENDA_ENV").or_else(|| lookup("NODE_ENV"));
        let backend = match env.as_deref() {
            Some("development") => Backend::Mock,
            _ => Backend::Network,
        };

        let mut config = Self::new(base_url).with_backend(backend);

        if let Some(path) = lookup("AGENDA_SESSION_FILE").filter(|v| !v.is_empty()) {
            config = config.with_session_file(path);
        }

        if let Some(raw) = lookup("AGENDA_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("AGENDA_TIMEOUT_SECS is not a number: '{}'", raw))
            })?;
            config = config.with_timeout(secs);
        }

        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.backend, Backend::Network);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.toast_ttl, Duration::from_secs(5));
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_legacy_variables_are_honoured() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("NEXT_PUBLIC_API_URL", "https://api.agendalivre.com.br/api"),
            ("NODE_ENV", "development"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.agendalivre.com.br/api");
        assert_eq!(config.backend, Backend::Mock);
    }

    #[test]
    fn test_agenda_variables_take_precedence() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("AGENDA_API_URL", "http://127.0.0.1:9000/api"),
            ("NEXT_PUBLIC_API_URL", "https://ignored"),
            ("AGENDA_ENV", "production"),
            ("NODE_ENV", "development"),
            ("AGENDA_SESSION_FILE", "/tmp/agenda-session.json"),
            ("AGENDA_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.backend, Backend::Network);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/agenda-session.json"))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("AGENDA_API_URL", "localhost:8000")])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("AGENDA_TIMEOUT_SECS", "soon")])),
            Err(ClientError::Config(_))
        ));
    }
}
