mod common;

use std::time::Duration;

use agenda_client::ApiClient;
use agenda_client::auth::AuthContext;
use agenda_client::calendar::available_times;
use agenda_client::directory::{Directory, DirectoryView, FilterState};
use agenda_client::session::SessionStore;
use agenda_mock::MockState;
use agenda_mock::fixtures::{CLIENT_EMAIL, PASSWORD};
use chrono::Weekday;
use rust_decimal::Decimal;
use shared::ErrorCode;
use shared::models::{
    AppointmentStatus, ProfessionalUpdate, ProfileUpdate, ScheduleBlockCreate, ServiceCreate,
    ServiceUpdate, StatusUpdate, WorkingHours,
};

use common::{as_client, as_professional, at, client, next_monday};

fn new_service(price: i64) -> ServiceCreate {
    ServiceCreate {
        name: "Twist".into(),
        description: None,
        price: Decimal::from(price),
        duration_minutes: 90,
        category: Some("trancas".into()),
        hair_prices: None,
    }
}

#[tokio::test]
async fn test_professional_manages_own_services() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;

    let created = api.create_service(&new_service(150)).await.unwrap();
    assert_eq!(created.professional_id, "pro-ana");
    assert_eq!(api.list_services("pro-ana").await.unwrap().len(), 4);

    let added = api.add_service("pro-ana", &new_service(90)).await.unwrap();
    assert_eq!(added.price, Decimal::from(90));

    let renamed = api
        .update_service(
            &created.id,
            &ServiceUpdate {
                name: Some("Twist Afro".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Twist Afro");
    assert_eq!(renamed.price, Decimal::from(150));

    api.delete_service(&added.id).await.unwrap();
    let ids: Vec<String> = api
        .list_services("pro-ana")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert!(ids.contains(&created.id));
    assert!(!ids.contains(&added.id));

    let err = api.delete_service(&added.id).await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ServiceNotFound));
}

#[tokio::test]
async fn test_service_price_must_be_positive() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;

    let err = api.create_service(&new_service(0)).await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ValidationFailed));

    let err = api
        .update_service(
            "svc-nago",
            &ServiceUpdate {
                price: Some(Decimal::from(-10)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ValidationFailed));

    let nago = api.get_professional("pro-ana").await.unwrap();
    assert_eq!(
        nago.service("svc-nago").map(|s| s.price),
        Some(Decimal::from(120))
    );
}

#[tokio::test]
async fn test_services_of_others_are_off_limits() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;

    let err = api
        .add_service("pro-carla", &new_service(60))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::PermissionDenied));

    // Carla's manicure is not in Ana's listing
    let err = api.delete_service("svc-manicure").await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ServiceNotFound));
    assert_eq!(api.list_services("pro-carla").await.unwrap().len(), 3);

    let (customer, _) = as_client(&state).await;
    let err = customer.create_service(&new_service(60)).await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ProfessionalRequired));
}

#[tokio::test]
async fn test_removing_last_service_drops_category() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;

    for id in ["svc-box-braids", "svc-nago", "svc-manutencao"] {
        api.delete_service(id).await.unwrap();
    }

    let ana = api.get_professional("pro-ana").await.unwrap();
    assert!(ana.categories.is_empty());

    let filters = FilterState::new().with_category("trancas");
    let page = api.list_professionals(&filters.to_query()).await.unwrap();
    assert_eq!(page.pagination.total, 0);

    let directory = Directory::new(client(&state));
    directory.load().await.unwrap();
    directory.set_filters(filters);
    assert!(directory.visible().is_empty());
    assert!(matches!(directory.view(), DirectoryView::Empty { .. }));
}

#[tokio::test]
async fn test_schedule_block_hides_slot() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;
    let date = next_monday();

    let before = api
        .availability("pro-ana", date, Some("svc-manutencao"))
        .await
        .unwrap();
    assert!(available_times(&before).contains(&at(14)));

    let block = api
        .create_block(&ScheduleBlockCreate {
            start: date.and_time(at(14)).and_utc(),
            end: date.and_time(at(15)).and_utc(),
            reason: Some("Curso".into()),
        })
        .await
        .unwrap();
    assert_eq!(block.professional_id, "pro-ana");

    let blocked = api
        .availability("pro-ana", date, Some("svc-manutencao"))
        .await
        .unwrap();
    let times = available_times(&blocked);
    assert!(!times.contains(&at(14)));
    assert!(times.contains(&at(15)));

    let blocks = api.list_blocks().await.unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].id, block.id);

    api.delete_block(&block.id).await.unwrap();
    assert!(api.list_blocks().await.unwrap().is_empty());
    let restored = api
        .availability("pro-ana", date, Some("svc-manutencao"))
        .await
        .unwrap();
    assert!(available_times(&restored).contains(&at(14)));

    let err = api.delete_block(&block.id).await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ScheduleBlockNotFound));
}

#[tokio::test]
async fn test_inverted_block_is_rejected() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;
    let date = next_monday();

    let err = api
        .create_block(&ScheduleBlockCreate {
            start: date.and_time(at(15)).and_utc(),
            end: date.and_time(at(14)).and_utc(),
            reason: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ValidationFailed));
    assert!(api.list_blocks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_professional_edits_profile_and_hours() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;

    let updated = api
        .update_professional_profile(&ProfessionalUpdate {
            bio: Some("Tranças e penteados afro.".into()),
            offers_home_service: Some(false),
            working_hours: Some(vec![
                WorkingHours::closed(Weekday::Mon),
                WorkingHours::open(Weekday::Tue, at(10), at(16)),
            ]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Tranças e penteados afro."));
    assert!(!updated.offers_home_service);
    assert_eq!(updated.home_service_fee, Decimal::ZERO);
    assert_eq!(updated.working_hours.len(), 2);

    let monday = api
        .availability("pro-ana", next_monday(), None)
        .await
        .unwrap();
    assert!(monday.slots.is_empty());

    let ana = api.get_professional("pro-ana").await.unwrap();
    assert_eq!(ana.name, "Ana Oliveira");
    assert_eq!(ana.working_hours, updated.working_hours);
}

#[tokio::test]
async fn test_invalid_profile_edit_is_rejected() {
    let state = MockState::with_fixtures();
    let (api, _) = as_professional(&state).await;

    let err = api
        .update_professional_profile(&ProfessionalUpdate {
            working_hours: Some(vec![WorkingHours::open(Weekday::Tue, at(16), at(10))]),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ValidationFailed));
    assert_eq!(
        api.get_professional("pro-ana")
            .await
            .unwrap()
            .working_hours
            .len(),
        7
    );

    let (customer, _) = as_client(&state).await;
    let err = customer
        .update_professional_profile(&ProfessionalUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ProfessionalRequired));
}

#[tokio::test]
async fn test_appointment_detail_is_owner_only() {
    let state = MockState::with_fixtures();
    let (customer, _) = as_client(&state).await;
    let (pro, _) = as_professional(&state).await;

    let apt = customer.get_appointment("apt-2").await.unwrap();
    assert_eq!(apt.professional_id, "pro-carla");
    assert_eq!(pro.get_appointment("apt-1").await.unwrap().id, "apt-1");

    let err = pro.get_appointment("apt-2").await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::PermissionDenied));

    let err = customer.get_appointment("apt-99").await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::AppointmentNotFound));
}

#[tokio::test]
async fn test_status_update_routes_by_actor() {
    let state = MockState::with_fixtures();
    let (pro, _) = as_professional(&state).await;
    let (customer, _) = as_client(&state).await;

    let apt = pro
        .update_appointment_status(
            "apt-1",
            &StatusUpdate {
                status: AppointmentStatus::NoShow,
            },
        )
        .await
        .unwrap();
    assert_eq!(apt.status, AppointmentStatus::NoShow);
    assert_eq!(
        state.appointment("apt-1").await.map(|a| a.status),
        Some(AppointmentStatus::NoShow)
    );

    let err = customer
        .update_appointment_status(
            "apt-2",
            &StatusUpdate {
                status: AppointmentStatus::NoShow,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidStatusTransition));
}

#[tokio::test]
async fn test_featured_and_reviews_are_ordered() {
    let state = MockState::with_fixtures();
    let api = client(&state);

    let featured = api.featured_professionals().await.unwrap();
    assert_eq!(featured.len(), 5);
    assert_eq!(featured[0].id, "pro-juliana");
    assert!(featured.windows(2).all(|w| w[0].rating >= w[1].rating));

    let reviews = api.list_reviews("pro-ana").await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews[0].created_at >= reviews[1].created_at);
}

#[tokio::test]
async fn test_profile_update_rewrites_session_cookie() {
    let state = MockState::with_fixtures();
    let dir = tempfile::tempdir().unwrap();
    let cookie = dir.path().join("session.json");
    let ttl = Duration::from_secs(3600);

    let api = ApiClient::with_router(state.router(), SessionStore::new(Some(cookie.clone()), ttl));
    let auth = AuthContext::new(api);
    auth.login(CLIENT_EMAIL, PASSWORD).await.unwrap();

    let user = auth
        .update_profile(ProfileUpdate {
            name: Some("Maria Souza Lima".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(user.name, "Maria Souza Lima");
    assert_eq!(
        auth.user().await.map(|u| u.name),
        Some("Maria Souza Lima".into())
    );

    let stored = SessionStore::new(Some(cookie), ttl)
        .load()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user.name, "Maria Souza Lima");
    assert_eq!(stored.user.email, CLIENT_EMAIL);
}
