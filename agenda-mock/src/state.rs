//! Shared state of the mock backend

use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::http::{Method, StatusCode};
use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Appointment, Notification, NotificationKind, NotificationStatus, Professional, ScheduleBlock,
    User,
};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::auth::JwtService;
use crate::fault::{FaultRule, RequestRecord};
use crate::fixtures;

/// Secret used when none is configured
pub const DEFAULT_JWT_SECRET: &str = "agenda-livre-mock-secret";

/// A user plus the password it logs in with
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub password: String,
}

/// Everything the backend knows, kept in memory
#[derive(Debug, Clone, Default)]
pub struct MockData {
    pub accounts: Vec<Account>,
    pub professionals: Vec<Professional>,
    pub appointments: Vec<Appointment>,
    pub notifications: Vec<Notification>,
    pub blocks: Vec<ScheduleBlock>,
}

impl MockData {
    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email))
    }

    pub fn user(&self, id: &str) -> Result<&User, AppError> {
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| u.id == id)
            .ok_or_else(AppError::not_authenticated)
    }

    pub fn user_mut(&mut self, id: &str) -> Result<&mut User, AppError> {
        self.accounts
            .iter_mut()
            .map(|a| &mut a.user)
            .find(|u| u.id == id)
            .ok_or_else(AppError::not_authenticated)
    }

    /// User account linked to a professional profile
    pub fn user_of_professional(&self, professional_id: &str) -> Option<&User> {
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| u.professional_id.as_deref() == Some(professional_id))
    }

    pub fn professional(&self, id: &str) -> Result<&Professional, AppError> {
        self.professionals
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))
    }

    pub fn professional_mut(&mut self, id: &str) -> Result<&mut Professional, AppError> {
        self.professionals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))
    }

    pub fn appointment(&self, id: &str) -> Result<&Appointment, AppError> {
        self.appointments
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))
    }

    pub fn appointment_mut(&mut self, id: &str) -> Result<&mut Appointment, AppError> {
        self.appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))
    }

    /// Queue an unread notification for `user_id`
    pub fn notify(
        &mut self,
        user_id: &str,
        title: impl Into<String>,
        message: Option<String>,
        kind: NotificationKind,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.into(),
            message,
            kind,
            status: NotificationStatus::Unread,
            created_at: Utc::now(),
        };
        self.notifications.push(notification.clone());
        notification
    }
}

struct Inner {
    data: RwLock<MockData>,
    jwt: JwtService,
    faults: Mutex<Vec<FaultRule>>,
    requests: Mutex<Vec<RequestRecord>>,
}

/// Clonable handle to the mock backend
#[derive(Clone)]
pub struct MockState {
    inner: Arc<Inner>,
}

impl MockState {
    pub fn new(data: MockData, jwt: JwtService) -> Self {
        Self {
            inner: Arc::new(Inner {
                data: RwLock::new(data),
                jwt,
                faults: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Seeded with the demo professionals, users and appointments
    pub fn with_fixtures() -> Self {
        Self::with_secret(DEFAULT_JWT_SECRET)
    }

    pub fn with_secret(secret: &str) -> Self {
        Self::new(fixtures::seed(), JwtService::new(secret))
    }

    pub fn router(&self) -> Router {
        crate::router(self.clone())
    }

    pub fn jwt(&self) -> &JwtService {
        &self.inner.jwt
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MockData> {
        self.inner.data.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, MockData> {
        self.inner.data.write().await
    }

    // ---- fault injection ----

    fn faults(&self) -> MutexGuard<'_, Vec<FaultRule>> {
        self.inner.faults.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer the next `method` request under `path_prefix` with `status`
    pub fn fail_next(&self, method: Method, path_prefix: impl Into<String>, status: StatusCode) {
        self.faults().push(FaultRule {
            method,
            path_prefix: path_prefix.into(),
            status,
        });
    }

    /// Consume the first rule matching this request
    pub(crate) fn take_fault(&self, method: &Method, path: &str) -> Option<StatusCode> {
        let mut faults = self.faults();
        let index = faults.iter().position(|rule| rule.matches(method, path))?;
        Some(faults.remove(index).status)
    }

    // ---- request log ----

    fn requests(&self) -> MutexGuard<'_, Vec<RequestRecord>> {
        self.inner.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn record(&self, method: Method, path: String) {
        self.requests().push(RequestRecord { method, path });
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    pub fn request_log(&self) -> Vec<RequestRecord> {
        self.requests().clone()
    }

    // ---- inspection ----

    pub async fn appointment(&self, id: &str) -> Option<Appointment> {
        self.read()
            .await
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub async fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        self.read()
            .await
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}
