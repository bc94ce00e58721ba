//! Client-related types shared between the backend and agenda-client
//!
//! Auth request/response DTOs used in API communication.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{User, UserType};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// `POST /auth/login/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "E-mail inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
}

/// `POST /auth/register/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Informe seu nome"))]
    pub name: String,
    #[validate(email(message = "E-mail inválido"))]
    pub email: String,
    #[validate(length(min = 10, max = 20, message = "Telefone inválido"))]
    pub phone: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
    pub user_type: UserType,
    /// Professionals only
    #[serde(default)]
    pub specialty: Option<String>,
}

/// Login / register response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "cliente@teste.com".into(),
            password: "123456".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "cliente".into(),
            password: "123".into(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_user_type_wire_format() {
        let req = RegisterRequest {
            name: "Bruna".into(),
            email: "bruna@teste.com".into(),
            phone: "11999998888".into(),
            password: "segredo1".into(),
            user_type: UserType::Professional,
            specialty: Some("Manicure".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["user_type"], "professional");
    }
}
