//! Toast queue
//!
//! Ephemeral messages in insertion order. Each toast dismisses itself after
//! the configured TTL; no deduplication, no persistence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Inner {
    toasts: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
    ttl: Duration,
}

/// Clonable handle to one toast queue
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Arc<Inner>,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                toasts: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                ttl,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.inner.toasts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a toast and schedule its dismissal
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let id = ToastId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let toast = Toast {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        tracing::debug!(id = id.0, severity = ?severity, message = %toast.message, "Toast shown");
        self.lock().push(toast);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let queue = self.clone();
                let ttl = self.inner.ttl;
                handle.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    queue.dismiss(id);
                });
            }
            Err(_) => {
                tracing::warn!(id = id.0, "No async runtime, toast will not auto-dismiss");
            }
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Info)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Warning)
    }

    /// Remove a toast early; returns whether it was still shown
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Visible toasts, oldest first
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|t| t.severity == severity).count()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_dismiss() {
        let queue = ToastQueue::default();
        let a = queue.success("Agendamento criado");
        let b = queue.error("Falha ao cancelar");
        let c = queue.info("Falha ao cancelar");
        assert_eq!(queue.len(), 3);
        assert!(a < b && b < c);

        assert!(queue.dismiss(b));
        assert!(!queue.dismiss(b));
        let ids: Vec<ToastId> = queue.snapshot().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_no_deduplication() {
        let queue = ToastQueue::default();
        queue.error("Erro");
        queue.error("Erro");
        assert_eq!(queue.count(Severity::Error), 2);
    }

    #[tokio::test]
    async fn test_auto_dismiss_after_ttl() {
        let queue = ToastQueue::new(Duration::from_millis(50));
        queue.warning("Sessão prestes a expirar");
        assert_eq!(queue.len(), 1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(queue.is_empty());
    }
}
