//! Client error types

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use shared::error::{ErrorCategory, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response did not match the envelope or the expected data shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local or server-side validation failure, with per-field messages
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// Error reported by the backend through the envelope
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Session file I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Booking submitted before every step was filled in; no request was sent
    #[error("Booking incomplete: {0}")]
    BookingIncomplete(String),

    /// Transition not offered for the appointment's current status; no request was sent
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Whether this error should end the session
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::Api { code, .. } => matches!(
                ErrorCode::try_from(*code),
                Ok(ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid)
            ),
            _ => false,
        }
    }

    /// Envelope error code, when the backend supplied a known one
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// Text shown to the user in a toast or inline form error
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => {
                "O servidor demorou para responder. Tente novamente.".to_string()
            }
            Self::Http(_) => "Não foi possível conectar ao servidor.".to_string(),
            Self::InvalidResponse(_) | Self::Serialization(_) => {
                "Resposta inesperada do servidor.".to_string()
            }
            Self::Unauthorized(msg) if !msg.is_empty() => msg.clone(),
            Self::Unauthorized(_) => "Sua sessão expirou. Faça login novamente.".to_string(),
            Self::Forbidden(_) => "Você não tem permissão para esta ação.".to_string(),
            Self::NotFound(_) => "Item não encontrado.".to_string(),
            Self::Validation { message, .. } => message.clone(),
            Self::Api { code, message, .. } => {
                if message.is_empty() {
                    ErrorCode::try_from(*code)
                        .map(|c| c.message().to_string())
                        .unwrap_or_else(|_| "Erro inesperado.".to_string())
                } else {
                    message.clone()
                }
            }
            Self::BookingIncomplete(msg) | Self::InvalidTransition(msg) => msg.clone(),
            Self::Internal(_) | Self::Config(_) | Self::Io(_) => {
                "Ocorreu um erro inesperado. Tente novamente.".to_string()
            }
        }
    }

    /// Category of the envelope code, if any
    pub fn category(&self) -> Option<ErrorCategory> {
        self.error_code().map(|c| c.category())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} inválido", field));
                fields.insert(field.to_string(), msg);
            }
        }
        let message = fields
            .values()
            .next()
            .cloned()
            .unwrap_or_else(|| "Dados inválidos".to_string());
        Self::Validation { message, fields }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
