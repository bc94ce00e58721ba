mod common;

use std::time::Duration;

use agenda_client::auth::AuthContext;
use agenda_client::professional::{ProfessionalPage, ProfessionalTab, TabContent};
use agenda_client::toast::{Severity, ToastQueue};
use agenda_client::{AgendaApp, ClientConfig, ClientError};
use agenda_mock::MockState;
use agenda_mock::fixtures::{CLIENT_EMAIL, PASSWORD};
use axum::http::{Method, StatusCode};
use shared::ErrorCode;
use shared::client::RegisterRequest;
use shared::models::{ReviewCreate, UserType};

use common::{as_client, client};

#[tokio::test]
async fn test_tabs_switch_without_fetching() {
    let state = MockState::with_fixtures();
    let mut page = ProfessionalPage::new(client(&state), ToastQueue::new(Duration::from_secs(30)));

    page.load("pro-ana").await.unwrap();
    let before = state.request_count();

    assert_eq!(page.tab(), ProfessionalTab::Services);
    assert!(matches!(page.tab_content(), Some(TabContent::Services(s)) if s.len() == 3));

    page.select_tab(ProfessionalTab::Reviews);
    assert!(matches!(page.tab_content(), Some(TabContent::Reviews(r)) if r.len() == 2));

    page.select_tab(ProfessionalTab::About);
    assert!(matches!(
        page.tab_content(),
        Some(TabContent::About { working_hours, .. }) if !working_hours.is_empty()
    ));

    assert_eq!(state.request_count(), before);
}

#[tokio::test]
async fn test_posted_review_is_folded_in_locally() {
    let state = MockState::with_fixtures();
    let (api, user) = as_client(&state).await;
    let toasts = ToastQueue::new(Duration::from_secs(30));
    let mut page = ProfessionalPage::new(api, toasts.clone());
    page.load("pro-ana").await.unwrap();

    let review = page
        .post_review(ReviewCreate {
            service_id: Some("svc-nago".into()),
            rating: 3,
            comment: "Bom atendimento".into(),
        })
        .await
        .unwrap();
    assert_eq!(review.client_id, user.id);
    assert_eq!(review.service_name.as_deref(), Some("Tranças Nagô"));

    let ana = page.professional().unwrap();
    assert_eq!(ana.review_count, 3);
    assert_eq!(ana.rating, 4.0);
    assert_eq!(ana.reviews[0].id, review.id);
    assert_eq!(toasts.count(Severity::Success), 1);

    assert_eq!(page.toggle_like(&review.id), Some(true));
    assert_eq!(page.toggle_like(&review.id), Some(false));
    assert_eq!(page.toggle_like("missing"), None);
}

#[tokio::test]
async fn test_invalid_review_is_not_sent() {
    let state = MockState::with_fixtures();
    let (api, _) = as_client(&state).await;
    let mut page = ProfessionalPage::new(api, ToastQueue::new(Duration::from_secs(30)));
    page.load("pro-ana").await.unwrap();

    let before = state.request_count();
    let err = page
        .post_review(ReviewCreate {
            service_id: None,
            rating: 0,
            comment: "Bom".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(state.request_count(), before);
    assert_eq!(page.professional().unwrap().review_count, 2);
}

#[tokio::test]
async fn test_register_then_duplicate_email() {
    let state = MockState::with_fixtures();
    let auth = AuthContext::new(client(&state));
    let request = RegisterRequest {
        name: "Paula Ribeiro".into(),
        email: "paula@teste.com".into(),
        phone: "11998765432".into(),
        password: "segredo1".into(),
        user_type: UserType::Professional,
        specialty: Some("Trancista".into()),
    };

    let outcome = auth.register(request.clone()).await.unwrap();
    assert_eq!(outcome.redirect_to, "/dashboard/professional");
    assert!(outcome.user.professional_id.is_some());
    assert!(auth.is_authenticated().await);

    let err = AuthContext::new(client(&state))
        .register(request)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::EmailAlreadyRegistered));
}

#[tokio::test]
async fn test_app_logout_drops_user_state() {
    let state = MockState::with_fixtures();
    let app = AgendaApp::with_api(ClientConfig::default(), client(&state));

    app.start().await.unwrap();
    assert!(!app.auth.is_loading());
    assert!(!app.auth.is_authenticated().await);

    app.auth.login(CLIENT_EMAIL, PASSWORD).await.unwrap();
    app.notifications.refresh().await.unwrap();
    assert_eq!(app.notifications.unread_count(), 2);

    app.logout().await.unwrap();
    assert!(app.notifications.notifications().is_empty());
    assert!(app.toasts.is_empty());
    assert!(app.api.token().await.is_none());
    assert!(!app.auth.is_authenticated().await);
}

#[tokio::test]
async fn test_expired_session_clears_user_state() {
    let state = MockState::with_fixtures();
    let app = AgendaApp::with_api(ClientConfig::default(), client(&state));

    app.auth.login(CLIENT_EMAIL, PASSWORD).await.unwrap();
    app.notifications.refresh().await.unwrap();
    app.toasts.info("Bem-vinda de volta");
    assert_eq!(app.notifications.notifications().len(), 3);

    state.fail_next(Method::GET, "/profile/", StatusCode::UNAUTHORIZED);
    assert!(app.api.profile().await.unwrap_err().is_unauthorized());

    for _ in 0..50 {
        if app.notifications.notifications().is_empty() && app.toasts.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(app.notifications.notifications().is_empty());
    assert!(app.toasts.is_empty());
    assert!(!app.auth.is_authenticated().await);
}
