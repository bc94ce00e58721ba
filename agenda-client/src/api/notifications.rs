//! Notification endpoints

use shared::models::{Notification, NotificationCreate};

use super::ApiClient;
use crate::ClientResult;

impl ApiClient {
    /// `GET /notifications/`
    pub async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.get("/notifications/").await
    }

    /// `POST /notifications/`
    pub async fn create_notification(
        &self,
        notification: &NotificationCreate,
    ) -> ClientResult<Notification> {
        self.post("/notifications/", notification).await
    }

    /// `PATCH /notifications/{id}/read/`
    pub async fn mark_notification_read(&self, id: &str) -> ClientResult<Notification> {
        self.patch_empty(&format!("/notifications/{}/read/", id)).await
    }

    /// `DELETE /notifications/{id}/`
    pub async fn delete_notification(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/notifications/{}/", id)).await
    }

    /// `POST /notifications/mark-all-read/`
    pub async fn mark_all_notifications_read(&self) -> ClientResult<()> {
        self.post_empty("/notifications/mark-all-read/").await
    }
}
