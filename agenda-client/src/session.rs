//! Session persistence
//!
//! The bearer token and the serialized user live in a JSON "session cookie"
//! with a fixed expiry. An expired cookie is discarded on load.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::User;
use tokio::sync::RwLock;

use crate::ClientResult;

/// Persisted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl SessionCookie {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Session store: in-memory copy plus optional cookie file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    ttl: Duration,
    current: Arc<RwLock<Option<SessionCookie>>>,
}

impl SessionStore {
    pub fn new(path: Option<PathBuf>, ttl: Duration) -> Self {
        Self {
            path,
            ttl,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Memory-only store
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(None, ttl)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the cookie file into memory
    ///
    /// Missing, unreadable or expired cookies yield `None`; an expired one is deleted.
    pub async fn load(&self) -> ClientResult<Option<SessionCookie>> {
        let Some(path) = &self.path else {
            return Ok(self.current().await);
        };
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let cookie = match serde_json::from_str::<SessionCookie>(&json) {
            Ok(cookie) => cookie,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable session cookie");
                fs::remove_file(path)?;
                return Ok(None);
            }
        };

        if cookie.is_expired() {
            tracing::info!(expires_at = %cookie.expires_at, "Session cookie expired");
            fs::remove_file(path)?;
            *self.current.write().await = None;
            return Ok(None);
        }

        *self.current.write().await = Some(cookie.clone());
        Ok(Some(cookie))
    }

    /// Store a fresh session expiring after the configured TTL
    pub async fn save(&self, token: String, user: User) -> ClientResult<SessionCookie> {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::hours(24));
        let cookie = SessionCookie {
            token,
            user,
            expires_at: Utc::now() + ttl,
        };
        self.write_file(&cookie)?;
        *self.current.write().await = Some(cookie.clone());
        Ok(cookie)
    }

    /// Replace the stored user, keeping token and expiry
    pub async fn update_user(&self, user: User) -> ClientResult<()> {
        let mut guard = self.current.write().await;
        if let Some(cookie) = guard.as_mut() {
            cookie.user = user;
            self.write_file(cookie)?;
        }
        Ok(())
    }

    pub async fn clear(&self) -> ClientResult<()> {
        *self.current.write().await = None;
        if let Some(path) = &self.path
            && path.exists()
        {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Current session, ignoring an expired one
    pub async fn current(&self) -> Option<SessionCookie> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|c| !c.is_expired())
            .cloned()
    }

    pub async fn token(&self) -> Option<String> {
        self.current().await.map(|c| c.token)
    }

    pub async fn user(&self) -> Option<User> {
        self.current().await.map(|c| c.user)
    }

    fn write_file(&self, cookie: &SessionCookie) -> ClientResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(cookie)?;
        fs::write(path, json)?;
        Ok(())
    }
}
