#![allow(dead_code)]

use std::time::Duration;

use agenda_client::ApiClient;
use agenda_client::auth::AuthContext;
use agenda_client::session::SessionStore;
use agenda_mock::MockState;
use agenda_mock::fixtures::{CLIENT_EMAIL, PASSWORD, PROFESSIONAL_EMAIL};
use chrono::{Datelike, Duration as Days, NaiveDate, NaiveTime, Utc, Weekday};
use shared::models::User;

pub fn client(state: &MockState) -> ApiClient {
    ApiClient::with_router(
        state.router(),
        SessionStore::in_memory(Duration::from_secs(3600)),
    )
}

pub async fn signed_in(state: &MockState, email: &str) -> (ApiClient, User) {
    let api = client(state);
    let outcome = AuthContext::new(api.clone())
        .login(email, PASSWORD)
        .await
        .unwrap();
    (api, outcome.user)
}

pub async fn as_client(state: &MockState) -> (ApiClient, User) {
    signed_in(state, CLIENT_EMAIL).await
}

pub async fn as_professional(state: &MockState) -> (ApiClient, User) {
    signed_in(state, PROFESSIONAL_EMAIL).await
}

/// First Monday strictly after today
pub fn next_monday() -> NaiveDate {
    let mut date = Utc::now().date_naive() + Days::days(1);
    while date.weekday() != Weekday::Mon {
        date += Days::days(1);
    }
    date
}

pub fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}
