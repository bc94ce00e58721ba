//! Appointment Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::service::HairLength;

/// Appointment lifecycle status (owned by the backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    PendingPayment,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending_payment" => Some(Self::PendingPayment),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }

    /// No further transitions leave this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Whether the appointment still blocks its time slot
    pub fn occupies_slot(&self) -> bool {
        matches!(self, Self::PendingPayment | Self::Confirmed)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is asking for a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Client,
    Professional,
}

/// Status transitions a client application may request.
///
/// `pending_payment -> confirmed` is driven by the payment webhook and is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AppointmentAction {
    Complete,
    Cancel { reason: Option<String> },
    MarkNoShow,
}

impl AppointmentAction {
    /// Status the backend is expected to move to
    pub fn target(&self) -> AppointmentStatus {
        match self {
            Self::Complete => AppointmentStatus::Completed,
            Self::Cancel { .. } => AppointmentStatus::Cancelled,
            Self::MarkNoShow => AppointmentStatus::NoShow,
        }
    }

    pub fn requires_professional(&self) -> bool {
        matches!(self, Self::Complete | Self::MarkNoShow)
    }

    /// Whether the transition table offers this action for `status` to `actor`
    pub fn allowed(&self, status: AppointmentStatus, actor: Actor) -> bool {
        if self.requires_professional() && actor != Actor::Professional {
            return false;
        }
        status == AppointmentStatus::Confirmed
    }

    /// Actions to offer in the UI for an appointment
    pub fn available(status: AppointmentStatus, actor: Actor) -> Vec<AppointmentAction> {
        [
            Self::Complete,
            Self::Cancel { reason: None },
            Self::MarkNoShow,
        ]
        .into_iter()
        .filter(|a| a.allowed(status, actor))
        .collect()
    }
}

/// Appointment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub professional_id: String,
    pub professional_name: String,
    pub service_id: String,
    pub service_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub is_home_service: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub use_own_hair: bool,
    #[serde(default)]
    pub hair_length: Option<HairLength>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Appointment {
    /// Half-open interval overlap against `[start, end)`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.status.occupies_slot() && self.start < end && start < self.end
    }
}

/// Create appointment payload (terminal step of the booking wizard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub professional_id: String,
    pub service_id: String,
    pub start: DateTime<Utc>,
    pub use_own_hair: bool,
    pub hair_length: Option<HairLength>,
    pub is_home_service: bool,
    pub address: Option<String>,
    pub has_allergies: bool,
    pub allergies_description: Option<String>,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub notes: Option<String>,
    /// Total the client saw; the backend recomputes and rejects a mismatch
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_total: Decimal,
}

/// `PATCH /appointments/{id}/` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
}

/// `PATCH /appointments/{id}/cancel/` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Query for appointment listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    /// `YYYY-MM-DD`, professional listings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&AppointmentStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");
        let status: AppointmentStatus = serde_json::from_str("\"no_show\"").unwrap();
        assert_eq!(status, AppointmentStatus::NoShow);
        assert_eq!(AppointmentStatus::parse("completed"), Some(AppointmentStatus::Completed));
        assert_eq!(AppointmentStatus::parse("pending"), None);
    }

    #[test]
    fn test_transition_table() {
        use AppointmentStatus::*;

        let cancel = AppointmentAction::Cancel { reason: None };
        assert!(cancel.allowed(Confirmed, Actor::Client));
        assert!(cancel.allowed(Confirmed, Actor::Professional));
        assert!(!cancel.allowed(PendingPayment, Actor::Client));
        assert!(!cancel.allowed(Completed, Actor::Professional));

        assert!(AppointmentAction::MarkNoShow.allowed(Confirmed, Actor::Professional));
        assert!(!AppointmentAction::MarkNoShow.allowed(Confirmed, Actor::Client));
        assert!(!AppointmentAction::Complete.allowed(Confirmed, Actor::Client));
    }

    #[test]
    fn test_available_actions() {
        let client = AppointmentAction::available(AppointmentStatus::Confirmed, Actor::Client);
        assert_eq!(client, vec![AppointmentAction::Cancel { reason: None }]);

        let pro = AppointmentAction::available(AppointmentStatus::Confirmed, Actor::Professional);
        assert_eq!(pro.len(), 3);

        assert!(AppointmentAction::available(AppointmentStatus::Cancelled, Actor::Professional)
            .is_empty());
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(AppointmentAction::Complete.target(), AppointmentStatus::Completed);
        assert_eq!(
            AppointmentAction::Cancel { reason: Some("doente".into()) }.target(),
            AppointmentStatus::Cancelled
        );
        assert_eq!(AppointmentAction::MarkNoShow.target(), AppointmentStatus::NoShow);
    }
}
