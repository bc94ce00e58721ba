//! Authentication context and route guard
//!
//! The session store is the single source of truth for "who is signed in";
//! [`AuthContext`] adds the loading flag and the login/logout flows. Because
//! the API client clears the same store on a 401, an expired session is
//! visible here without extra wiring.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use shared::client::{LoginRequest, RegisterRequest};
use shared::models::{ProfileUpdate, User, UserType};
use tokio::sync::broadcast;
use validator::Validate;

use crate::api::{ApiClient, LOGIN_ROUTE, SessionEvent};
use crate::{ClientError, ClientResult};

/// Route prefixes that need a session
pub const PROTECTED_PREFIXES: &[&str] =
    &["/dashboard", "/appointments", "/booking", "/notifications"];

const CLIENT_DASHBOARD: &str = "/dashboard/client";
const PROFESSIONAL_DASHBOARD: &str = "/dashboard/professional";

/// `{ user, loading, is_authenticated }` at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub loading: bool,
    pub is_authenticated: bool,
}

/// Successful login or registration
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: User,
    /// Landing route for the user's type
    pub redirect_to: String,
}

#[derive(Debug, Clone)]
pub struct AuthContext {
    api: ApiClient,
    loading: Arc<AtomicBool>,
}

impl AuthContext {
    /// Starts in the loading state until [`AuthContext::restore`] runs
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            loading: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Load the persisted session and verify it with `GET /profile/`
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        let result = self.restore_inner().await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn restore_inner(&self) -> ClientResult<Option<User>> {
        let Some(cookie) = self.api.session().load().await? else {
            return Ok(None);
        };
        self.api.set_token(Some(cookie.token.clone())).await;

        match self.api.profile().await {
            Ok(user) => {
                self.api.session().update_user(user.clone()).await?;
                tracing::info!(user_id = %user.id, "Session restored");
                Ok(Some(user))
            }
            // The API client already cleared the session
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "Could not verify session, using cached user");
                Ok(Some(cookie.user))
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response = self.api.login(&request).await.inspect_err(|e| {
            tracing::warn!(email = %request.email, error = %e, "Login failed");
        })?;
        self.start_session(response.token, response.user).await
    }

    pub async fn register(&self, request: RegisterRequest) -> ClientResult<LoginOutcome> {
        request.validate()?;
        if request.user_type == UserType::Professional
            && request.specialty.as_deref().is_none_or(|s| s.trim().is_empty())
        {
            let mut fields = std::collections::BTreeMap::new();
            fields.insert("specialty".to_string(), "Informe sua especialidade".to_string());
            return Err(ClientError::Validation {
                message: "Informe sua especialidade".into(),
                fields,
            });
        }

        let response = self.api.register(&request).await.inspect_err(|e| {
            tracing::warn!(email = %request.email, error = %e, "Registration failed");
        })?;
        self.start_session(response.token, response.user).await
    }

    async fn start_session(&self, token: String, user: User) -> ClientResult<LoginOutcome> {
        self.api.session().save(token.clone(), user.clone()).await?;
        self.api.set_token(Some(token)).await;
        self.loading.store(false, Ordering::SeqCst);
        tracing::info!(user_id = %user.id, user_type = ?user.user_type, "Signed in");
        self.api.emit(SessionEvent::LoggedIn(user.clone()));
        Ok(LoginOutcome {
            redirect_to: user.user_type.home_route().to_string(),
            user,
        })
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.api.set_token(None).await;
        self.api.session().clear().await?;
        tracing::info!("Signed out");
        self.api.emit(SessionEvent::LoggedOut);
        Ok(())
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> ClientResult<User> {
        update.validate()?;
        let user = self.api.update_profile(&update).await?;
        self.api.session().update_user(user.clone()).await?;
        self.api.emit(SessionEvent::Updated(user.clone()));
        Ok(user)
    }

    pub async fn user(&self) -> Option<User> {
        self.api.session().user().await
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.api.session().current().await.is_some()
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        let user = self.user().await;
        AuthSnapshot {
            is_authenticated: user.is_some(),
            loading: self.is_loading(),
            user,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.api.subscribe()
    }

    /// Guard decision for `path` with the current state
    pub async fn guard(&self, path: &str) -> RouteDecision {
        RouteGuard::check(path, &self.snapshot().await)
    }
}

/// What to do when navigating to a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still resolving; render a placeholder
    Loading,
    RedirectToLogin { return_url: String },
    Redirect { to: String },
    Allow,
}

impl RouteDecision {
    /// Full login URL carrying `returnUrl`
    pub fn login_url(return_url: &str) -> String {
        match reqwest::Url::parse_with_params("http://localhost/", &[("returnUrl", return_url)]) {
            Ok(url) => format!("{}?{}", LOGIN_ROUTE, url.query().unwrap_or_default()),
            Err(_) => LOGIN_ROUTE.to_string(),
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn is_protected(path: &str) -> bool {
        let path = strip_query(path);
        PROTECTED_PREFIXES.iter().any(|p| has_prefix(path, p))
    }

    pub fn check(path: &str, auth: &AuthSnapshot) -> RouteDecision {
        let bare = strip_query(path);

        if !Self::is_protected(bare) {
            if let Some(user) = &auth.user
                && (has_prefix(bare, LOGIN_ROUTE) || has_prefix(bare, "/register"))
            {
                return RouteDecision::Redirect {
                    to: user.user_type.home_route().to_string(),
                };
            }
            return RouteDecision::Allow;
        }

        if auth.loading {
            return RouteDecision::Loading;
        }

        let Some(user) = auth.user.as_ref().filter(|_| auth.is_authenticated) else {
            return RouteDecision::RedirectToLogin {
                return_url: path.to_string(),
            };
        };

        let home = user.user_type.home_route();
        let wrong_dashboard = match user.user_type {
            UserType::Client => has_prefix(bare, PROFESSIONAL_DASHBOARD),
            UserType::Professional => has_prefix(bare, CLIENT_DASHBOARD),
        };
        if wrong_dashboard || bare.trim_end_matches('/') == "/dashboard" {
            return RouteDecision::Redirect { to: home.to_string() };
        }

        RouteDecision::Allow
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(user_type: UserType) -> User {
        User {
            id: "u1".into(),
            name: "Maria".into(),
            email: "maria@teste.com".into(),
            phone: "11987654321".into(),
            user_type,
            professional_id: None,
            addresses: vec![],
            created_at: Utc::now(),
        }
    }

    fn signed_in(user_type: UserType) -> AuthSnapshot {
        AuthSnapshot {
            user: Some(user(user_type)),
            loading: false,
            is_authenticated: true,
        }
    }

    fn anonymous(loading: bool) -> AuthSnapshot {
        AuthSnapshot {
            user: None,
            loading,
            is_authenticated: false,
        }
    }

    #[test]
    fn test_public_routes_always_render() {
        assert_eq!(RouteGuard::check("/", &anonymous(true)), RouteDecision::Allow);
        assert_eq!(
            RouteGuard::check("/professionals/1", &anonymous(false)),
            RouteDecision::Allow
        );
        // prefix must end at a segment boundary
        assert_eq!(
            RouteGuard::check("/dashboards-info", &anonymous(false)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_loading_gates_protected_routes() {
        assert_eq!(
            RouteGuard::check("/dashboard/client", &anonymous(true)),
            RouteDecision::Loading
        );
    }

    #[test]
    fn test_anonymous_is_sent_to_login_with_return_url() {
        assert_eq!(
            RouteGuard::check("/booking/p1?service=s1", &anonymous(false)),
            RouteDecision::RedirectToLogin {
                return_url: "/booking/p1?service=s1".into()
            }
        );
        assert_eq!(
            RouteDecision::login_url("/appointments"),
            "/login?returnUrl=%2Fappointments"
        );
    }

    #[test]
    fn test_user_type_dashboards() {
        let client = signed_in(UserType::Client);
        let professional = signed_in(UserType::Professional);

        assert_eq!(
            RouteGuard::check("/dashboard/professional/services", &client),
            RouteDecision::Redirect {
                to: "/dashboard/client".into()
            }
        );
        assert_eq!(
            RouteGuard::check("/dashboard/client", &professional),
            RouteDecision::Redirect {
                to: "/dashboard/professional".into()
            }
        );
        assert_eq!(
            RouteGuard::check("/dashboard", &professional),
            RouteDecision::Redirect {
                to: "/dashboard/professional".into()
            }
        );
        assert_eq!(
            RouteGuard::check("/dashboard/client/appointments", &client),
            RouteDecision::Allow
        );
        assert_eq!(RouteGuard::check("/notifications", &client), RouteDecision::Allow);
    }

    #[test]
    fn test_signed_in_user_skips_login_page() {
        assert_eq!(
            RouteGuard::check("/login", &signed_in(UserType::Client)),
            RouteDecision::Redirect {
                to: "/dashboard/client".into()
            }
        );
    }
}
