//! Application context
//!
//! Bundles the stores a UI shell needs, created once at start-up and passed
//! around explicitly.

use shared::models::{Actor, Professional, UserType};
use tokio::sync::broadcast::error::RecvError;

use crate::api::{ApiClient, SessionEvent};
use crate::appointments::AppointmentBoard;
use crate::auth::AuthContext;
use crate::booking::BookingWizard;
use crate::config::ClientConfig;
use crate::directory::Directory;
use crate::notifications::NotificationCenter;
use crate::professional::ProfessionalPage;
use crate::toast::ToastQueue;
use crate::ClientResult;

#[derive(Debug, Clone)]
pub struct AgendaApp {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub auth: AuthContext,
    pub toasts: ToastQueue,
    pub notifications: NotificationCenter,
    pub directory: Directory,
}

impl AgendaApp {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::from_config(&config)?;
        Ok(Self::with_api(config, api))
    }

    /// Build around an existing client (tests, custom transports)
    pub fn with_api(config: ClientConfig, api: ApiClient) -> Self {
        let toasts = ToastQueue::new(config.toast_ttl);
        let app = Self {
            auth: AuthContext::new(api.clone()),
            notifications: NotificationCenter::new(api.clone(), toasts.clone()),
            directory: Directory::new(api.clone()),
            toasts,
            api,
            config,
        };
        app.watch_session();
        app
    }

    /// Drop per-user state when the backend expires the session
    fn watch_session(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime, session expiry will not reset the stores");
            return;
        };
        let mut events = self.api.subscribe();
        let notifications = self.notifications.clone();
        let toasts = self.toasts.clone();
        handle.spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Expired { redirect_to }) => {
                        tracing::info!(%redirect_to, "Session expired, clearing stores");
                        notifications.clear();
                        toasts.clear();
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session events lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    /// Restore the persisted session and, when signed in, load notifications
    pub async fn start(&self) -> ClientResult<()> {
        if self.auth.restore().await?.is_some()
            && let Err(e) = self.notifications.refresh().await
        {
            tracing::warn!(error = %e, "Notifications unavailable at start-up");
        }
        Ok(())
    }

    /// Sign out and drop per-user state
    pub async fn logout(&self) -> ClientResult<()> {
        self.auth.logout().await?;
        self.notifications.clear();
        self.toasts.clear();
        Ok(())
    }

    pub fn professional_page(&self) -> ProfessionalPage {
        ProfessionalPage::new(self.api.clone(), self.toasts.clone())
    }

    pub fn booking(&self, professional: Professional) -> BookingWizard {
        BookingWizard::new(professional)
    }

    /// Appointment board for the signed-in user's role
    pub async fn appointment_board(&self) -> AppointmentBoard {
        let actor = match self.auth.user().await.map(|u| u.user_type) {
            Some(UserType::Professional) => Actor::Professional,
            _ => Actor::Client,
        };
        AppointmentBoard::new(self.api.clone(), self.toasts.clone(), actor)
    }
}
