//! Token issuing and the authenticated-user extractor

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Actor, User, UserType};
use thiserror::Error;

use crate::state::MockState;

/// Default token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub user_type: UserType,
    #[serde(default)]
    pub professional_id: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::new(ErrorCode::TokenExpired),
            JwtError::InvalidToken(msg) => AppError::token_invalid(msg),
            JwtError::GenerationFailed(msg) => AppError::internal(msg),
        }
    }
}

/// HS256 signer/verifier
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            user_type: user.user_type,
            professional_id: user.professional_id.clone(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// The caller behind a valid bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub user_type: UserType,
    pub professional_id: Option<String>,
}

impl CurrentUser {
    /// Role of this user towards an appointment, if any
    pub fn actor_for(&self, client_id: &str, professional_id: &str) -> Option<Actor> {
        if self.professional_id.as_deref() == Some(professional_id) {
            Some(Actor::Professional)
        } else if self.id == client_id {
            Some(Actor::Client)
        } else {
            None
        }
    }

    pub fn require_professional(&self) -> Result<&str, AppError> {
        self.professional_id
            .as_deref()
            .ok_or_else(|| AppError::new(ErrorCode::ProfessionalRequired))
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            user_type: claims.user_type,
            professional_id: claims.professional_id,
        }
    }
}

impl FromRequestParts<MockState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &MockState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AppError::not_authenticated)?;
        let token = JwtService::extract_from_header(auth_header)
            .ok_or_else(|| AppError::token_invalid("Invalid authorization header"))?;

        let claims = state.jwt().validate_token(token).map_err(|e| {
            tracing::warn!(uri = %parts.uri, error = %e, "Rejected bearer token");
            AppError::from(e)
        })?;

        let user = CurrentUser::from(claims);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user-pro".into(),
            name: "Ana Oliveira".into(),
            email: "profissional@teste.com".into(),
            phone: "11987654321".into(),
            user_type: UserType::Professional,
            professional_id: Some("pro-ana".into()),
            addresses: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_carries_identity() {
        let jwt = JwtService::new("test-secret");
        let token = jwt.generate_token(&user()).unwrap();
        let current = CurrentUser::from(jwt.validate_token(&token).unwrap());
        assert_eq!(current.id, "user-pro");
        assert_eq!(current.professional_id.as_deref(), Some("pro-ana"));
        assert_eq!(current.actor_for("user-client", "pro-ana"), Some(Actor::Professional));
        assert_eq!(current.actor_for("user-client", "pro-carla"), None);
    }

    #[test]
    fn test_expired_and_foreign_tokens_are_rejected() {
        let expired = JwtService::new("test-secret").with_ttl(Duration::hours(-1));
        let token = expired.generate_token(&user()).unwrap();
        assert!(matches!(
            JwtService::new("test-secret").validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));

        let token = JwtService::new("other-secret").generate_token(&user()).unwrap();
        assert!(matches!(
            JwtService::new("test-secret").validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }
}
