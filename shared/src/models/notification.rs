//! Notification Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Appointment,
    Payment,
    Review,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Read,
    Unread,
}

/// Notification entity, created server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}

/// `POST /notifications/` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreate {
    /// Recipient; defaults to the caller
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    pub kind: NotificationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::json!({
            "id": "n1",
            "user_id": "u1",
            "title": "Agendamento confirmado",
            "kind": "appointment",
            "status": "unread",
            "created_at": "2026-03-10T12:00:00Z"
        });
        let n: Notification = serde_json::from_value(json).unwrap();
        assert!(n.is_unread());
        assert!(n.message.is_none());
        assert_eq!(n.kind, NotificationKind::Appointment);
    }
}
