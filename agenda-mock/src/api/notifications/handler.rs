//! Notification API Handlers

use axum::Json;
use axum::extract::{Path, State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Notification, NotificationCreate, NotificationStatus};
use shared::response::ApiResponse;

use crate::api::ok;
use crate::auth::CurrentUser;
use crate::state::MockState;

/// GET /notifications/ - newest first
pub async fn list(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Notification>>>> {
    let mut notifications = state.notifications_for(&current.id).await;
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(ok(notifications))
}

/// POST /notifications/ - defaults to the caller as recipient
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    Json(payload): Json<NotificationCreate>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    if payload.title.trim().is_empty() {
        return Err(
            AppError::validation("Validation failed").with_detail("title", "Informe o título"),
        );
    }
    let mut data = state.write().await;
    let recipient = payload.user_id.unwrap_or_else(|| current.id.clone());
    data.user(&recipient)
        .map_err(|_| AppError::not_found(format!("User {}", recipient)))?;
    Ok(ok(data.notify(&recipient, payload.title, payload.message, payload.kind)))
}

/// PATCH /notifications/{id}/read/
pub async fn mark_read(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    let mut data = state.write().await;
    let notification = data
        .notifications
        .iter_mut()
        .find(|n| n.id == id && n.user_id == current.id)
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound))?;
    notification.status = NotificationStatus::Read;
    Ok(ok(notification.clone()))
}

/// DELETE /notifications/{id}/
pub async fn delete(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut data = state.write().await;
    let before = data.notifications.len();
    data.notifications
        .retain(|n| !(n.id == id && n.user_id == current.id));
    if data.notifications.len() == before {
        return Err(AppError::new(ErrorCode::NotificationNotFound));
    }
    Ok(Json(ApiResponse::ok()))
}

/// POST /notifications/mark-all-read/
pub async fn mark_all_read(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut data = state.write().await;
    let mut count = 0;
    for n in data
        .notifications
        .iter_mut()
        .filter(|n| n.user_id == current.id && n.is_unread())
    {
        n.status = NotificationStatus::Read;
        count += 1;
    }
    tracing::debug!(user_id = %current.id, count, "Notifications marked read");
    Ok(Json(ApiResponse::ok()))
}
