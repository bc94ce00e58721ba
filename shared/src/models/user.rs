//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Client,
    Professional,
}

impl UserType {
    /// Dashboard a user of this type lands on after login
    pub fn home_route(&self) -> &'static str {
        match self {
            Self::Client => "/dashboard/client",
            Self::Professional => "/dashboard/professional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    /// One-line form used as the home-service address
    pub fn one_line(&self) -> String {
        let mut line = format!("{}, {}", self.street, self.number);
        if let Some(complement) = &self.complement {
            line.push_str(" - ");
            line.push_str(complement);
        }
        line.push_str(&format!(", {}, {} - {}", self.district, self.city, self.state));
        line
    }
}

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    /// Set for professional accounts: the listing they own
    #[serde(default)]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
    }
}

/// `PATCH /profile/` body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 2, message = "Nome muito curto"))]
    pub name: Option<String>,
    #[validate(length(min = 10, max = 20, message = "Telefone inválido"))]
    pub phone: Option<String>,
    pub addresses: Option<Vec<Address>>,
}
