//! Notification center

use std::sync::{Arc, Mutex, MutexGuard};

use shared::models::{Notification, NotificationStatus};

use crate::api::ApiClient;
use crate::toast::ToastQueue;
use crate::{ClientError, ClientResult};

/// Clonable handle to the signed-in user's notifications
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    api: ApiClient,
    toasts: ToastQueue,
    items: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new(api: ApiClient, toasts: ToastQueue) -> Self {
        Self {
            api,
            toasts,
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|n| n.is_unread()).count()
    }

    /// `GET /notifications/`
    pub async fn refresh(&self) -> ClientResult<()> {
        match self.api.list_notifications().await {
            Ok(list) => {
                *self.lock() = list;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load notifications", e)),
        }
    }

    /// Replace the entry with the server's copy
    pub async fn mark_read(&self, id: &str) -> ClientResult<()> {
        match self.api.mark_notification_read(id).await {
            Ok(updated) => {
                let mut items = self.lock();
                if let Some(slot) = items.iter_mut().find(|n| n.id == id) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to mark notification read", e)),
        }
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        match self.api.delete_notification(id).await {
            Ok(()) => {
                self.lock().retain(|n| n.id != id);
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to delete notification", e)),
        }
    }

    pub async fn mark_all_read(&self) -> ClientResult<()> {
        match self.api.mark_all_notifications_read().await {
            Ok(()) => {
                for n in self.lock().iter_mut() {
                    n.status = NotificationStatus::Read;
                }
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to mark notifications read", e)),
        }
    }

    /// Drop everything (on logout)
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn fail(&self, context: &'static str, error: ClientError) -> ClientError {
        tracing::warn!(error = %error, "{}", context);
        self.toasts.error(error.user_message());
        error
    }
}
