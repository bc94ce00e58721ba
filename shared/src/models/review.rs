//! Review Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review left by a client on a professional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub professional_id: String,
    pub client_id: String,
    pub client_name: String,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    /// 1..=5
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    /// Local-only optimistic flag, never sent to the backend
    #[serde(default, skip_serializing)]
    pub liked: bool,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewCreate {
    #[serde(default)]
    pub service_id: Option<String>,
    #[validate(range(min = 1, max = 5, message = "A nota deve ser entre 1 e 5"))]
    pub rating: u8,
    #[validate(length(
        min = 3,
        max = 1000,
        message = "O comentário deve ter entre 3 e 1000 caracteres"
    ))]
    pub comment: String,
}
