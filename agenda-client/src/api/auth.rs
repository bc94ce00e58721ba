//! Auth and profile endpoints

use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
use shared::models::{ProfileUpdate, User};

use super::ApiClient;
use crate::ClientResult;

impl ApiClient {
    /// `POST /auth/login/`
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.post("/auth/login/", request).await
    }

    /// `POST /auth/register/`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.post("/auth/register/", request).await
    }

    /// `GET /profile/`
    pub async fn profile(&self) -> ClientResult<User> {
        self.get("/profile/").await
    }

    /// `PATCH /profile/`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.patch("/profile/", update).await
    }
}
