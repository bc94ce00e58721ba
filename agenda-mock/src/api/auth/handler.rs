//! Authentication API Handlers

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Location, NotificationKind, Professional, ProfileUpdate, User, UserType};
use shared::response::ApiResponse;
use shared::util::new_id;

use crate::api::{ok, validate};
use crate::auth::CurrentUser;
use crate::state::{Account, MockState};

/// POST /auth/login/
pub async fn login(
    State(state): State<MockState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    validate(&payload)?;
    let data = state.read().await;
    let account = data
        .account_by_email(&payload.email)
        .filter(|a| a.password == payload.password)
        .ok_or_else(|| {
            tracing::warn!(email = %payload.email, "Login rejected");
            AppError::invalid_credentials()
        })?;

    let token = state.jwt().generate_token(&account.user)?;
    tracing::info!(user_id = %account.user.id, "User logged in");
    Ok(ok(AuthResponse {
        token,
        user: account.user.clone(),
    }))
}

/// POST /auth/register/
///
/// Professionals also get an empty public profile linked to the account.
pub async fn register(
    State(state): State<MockState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    validate(&payload)?;
    let specialty = match payload.user_type {
        UserType::Professional => Some(
            payload
                .specialty
                .clone()
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| {
                    AppError::validation("Validation failed")
                        .with_detail("specialty", "Informe sua especialidade")
                })?,
        ),
        UserType::Client => None,
    };

    let mut data = state.write().await;
    if data.account_by_email(&payload.email).is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let professional_id = specialty.map(|specialty| {
        let professional = Professional {
            id: new_id(),
            name: payload.name.clone(),
            specialty,
            bio: None,
            profile_image: String::new(),
            cover_image: None,
            rating: 0.0,
            review_count: 0,
            location: Location {
                district: String::new(),
                zone: String::new(),
                address: None,
            },
            offers_home_service: false,
            home_service_fee: Decimal::ZERO,
            contact: None,
            working_hours: Vec::new(),
            services: Vec::new(),
            reviews: Vec::new(),
            categories: Vec::new(),
            is_verified: false,
        };
        let id = professional.id.clone();
        data.professionals.push(professional);
        id
    });

    let user = User {
        id: new_id(),
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        user_type: payload.user_type,
        professional_id,
        addresses: Vec::new(),
        created_at: Utc::now(),
    };
    data.accounts.push(Account {
        user: user.clone(),
        password: payload.password,
    });
    data.notify(
        &user.id,
        "Bem-vindo ao Agenda Livre",
        None,
        NotificationKind::System,
    );

    let token = state.jwt().generate_token(&user)?;
    tracing::info!(user_id = %user.id, user_type = ?user.user_type, "User registered");
    Ok(ok(AuthResponse { token, user }))
}

/// GET /profile/
pub async fn profile(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let data = state.read().await;
    Ok(ok(data.user(&current.id)?.clone()))
}

/// PATCH /profile/
pub async fn update_profile(
    State(state): State<MockState>,
    current: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<ApiResponse<User>>> {
    validate(&payload)?;
    let mut data = state.write().await;
    let user = data.user_mut(&current.id)?;
    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(phone) = payload.phone {
        user.phone = phone;
    }
    if let Some(addresses) = payload.addresses {
        user.addresses = addresses;
    }
    Ok(ok(user.clone()))
}
