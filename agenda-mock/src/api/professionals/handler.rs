//! Professional API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use shared::Page;
use shared::error::AppResult;
use shared::filter::{FilterQuery, apply_filters};
use shared::models::{
    Availability, AvailabilityQuery, NotificationKind, Professional, ProfessionalUpdate, Review,
    ReviewCreate, generate_slots,
};
use shared::response::ApiResponse;
use shared::util::new_id;

use crate::api::{invalid_field, ok, validate};
use crate::auth::CurrentUser;
use crate::state::{MockData, MockState};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;
const FEATURED_COUNT: usize = 6;
const SLOT_STEP_MINUTES: i64 = 30;

/// GET /professionals/ - filtered, paginated directory
pub async fn list(
    State(state): State<MockState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<ApiResponse<Page<Professional>>>> {
    let page = query.page.unwrap_or(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let filters = query.into_state();

    let data = state.read().await;
    let matching = apply_filters(&data.professionals, &filters);
    Ok(ok(Page::paginate(matching, page, per_page)))
}

/// GET /professionals/featured/ - best rated first
pub async fn featured(
    State(state): State<MockState>,
) -> AppResult<Json<ApiResponse<Vec<Professional>>>> {
    let mut professionals = state.read().await.professionals.clone();
    professionals.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    professionals.truncate(FEATURED_COUNT);
    Ok(ok(professionals))
}

/// GET /professionals/{id}/
pub async fn get_by_id(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Professional>>> {
    let data = state.read().await;
    Ok(ok(data.professional(&id)?.clone()))
}

/// PATCH /professionals/profile/ - the caller's own listing and working hours
pub async fn update_own(
    State(state): State<MockState>,
    current: CurrentUser,
    Json(payload): Json<ProfessionalUpdate>,
) -> AppResult<Json<ApiResponse<Professional>>> {
    let professional_id = current.require_professional()?;
    if let Some((field, message)) = payload.invalid_field() {
        return Err(invalid_field(field, message));
    }
    let mut data = state.write().await;
    let professional = data.professional_mut(professional_id)?;
    payload.apply(professional);
    if !professional.offers_home_service {
        professional.home_service_fee = Decimal::ZERO;
    }
    let updated = professional.clone();
    tracing::info!(%professional_id, "Professional profile updated");
    Ok(ok(updated))
}

/// GET /professionals/{id}/reviews/ - newest first
pub async fn list_reviews(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Review>>>> {
    let data = state.read().await;
    let mut reviews = data.professional(&id)?.reviews.clone();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(ok(reviews))
}

/// POST /professionals/{id}/reviews/
pub async fn create_review(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<ApiResponse<Review>>> {
    validate(&payload)?;
    let mut data = state.write().await;
    let client_name = data.user(&current.id)?.name.clone();
    let professional = data.professional_mut(&id)?;

    let service_name = payload
        .service_id
        .as_deref()
        .and_then(|sid| professional.service(sid))
        .map(|s| s.name.clone());
    let review = Review {
        id: new_id(),
        professional_id: id.clone(),
        client_id: current.id.clone(),
        client_name,
        service_id: payload.service_id,
        service_name,
        rating: payload.rating,
        comment: payload.comment,
        created_at: Utc::now(),
        liked: false,
    };
    professional.reviews.insert(0, review.clone());
    professional.record_review(review.rating);
    tracing::info!(professional_id = %id, rating = review.rating, "Review posted");

    if let Some(owner) = data.user_of_professional(&id).map(|u| u.id.clone()) {
        data.notify(
            &owner,
            "Nova avaliação recebida",
            Some(format!("{} estrelas", review.rating)),
            NotificationKind::Review,
        );
    }
    Ok(ok(review))
}

/// GET /professionals/{id}/availability/?date=YYYY-MM-DD[&service_id=]
///
/// Slots every 30 minutes inside the working hours of that weekday; a slot
/// is unavailable when the service would overlap an appointment, a block or
/// has already started.
pub async fn availability(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<Availability>>> {
    let data = state.read().await;
    let professional = data.professional(&id)?;
    Ok(ok(day_availability(&data, professional, &query, Utc::now())))
}

fn day_availability(
    data: &MockData,
    professional: &Professional,
    query: &AvailabilityQuery,
    now: DateTime<Utc>,
) -> Availability {
    let date = query.date;
    let hours = professional
        .hours_for(date.weekday())
        .filter(|h| h.is_open())
        .and_then(|h| Some((h.opens?, h.closes?)));
    let Some((opens, closes)) = hours else {
        return Availability {
            date,
            slots: Vec::new(),
        };
    };

    let duration = query
        .service_id
        .as_deref()
        .and_then(|sid| professional.service(sid))
        .map(|s| i64::from(s.duration_minutes))
        .unwrap_or(SLOT_STEP_MINUTES);

    let mut busy: Vec<(NaiveTime, NaiveTime)> = data
        .appointments
        .iter()
        .filter(|a| a.professional_id == professional.id && a.status.occupies_slot())
        .filter_map(|a| clamp_to_day(date, a.start, a.end))
        .chain(
            data.blocks
                .iter()
                .filter(|b| b.professional_id == professional.id)
                .filter_map(|b| clamp_to_day(date, b.start, b.end)),
        )
        .collect();
    if date == now.date_naive() {
        busy.push((NaiveTime::MIN, now.time()));
    } else if date < now.date_naive() {
        busy.push((NaiveTime::MIN, closes));
    }

    Availability {
        date,
        slots: generate_slots(
            opens,
            closes,
            Duration::minutes(SLOT_STEP_MINUTES),
            Duration::minutes(duration),
            &busy,
        ),
    }
}

/// Part of `[start, end)` that falls on `date`, as wall-clock times
fn clamp_to_day(
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<(NaiveTime, NaiveTime)> {
    let day_start = date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);
    if end <= day_start || start >= day_end {
        return None;
    }
    let from = if start <= day_start {
        NaiveTime::MIN
    } else {
        start.time()
    };
    let to = if end >= day_end {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        end.time()
    };
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Weekday;
    use shared::models::{AppointmentStatus, ScheduleBlock};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// First Monday strictly after today
    fn next_monday() -> NaiveDate {
        let mut date = Utc::now().date_naive() + Duration::days(1);
        while date.weekday() != Weekday::Mon {
            date += Duration::days(1);
        }
        date
    }

    #[test]
    fn test_appointments_and_blocks_take_slots() {
        let mut data = fixtures::seed();
        data.appointments.clear();
        let date = next_monday();
        let mut apt = fixtures::seed().appointments[0].clone();
        apt.professional_id = "pro-ana".into();
        apt.status = AppointmentStatus::Confirmed;
        apt.start = date.and_time(t(10, 0)).and_utc();
        apt.end = date.and_time(t(11, 0)).and_utc();
        data.appointments.push(apt);
        data.blocks.push(ScheduleBlock {
            id: "blk-1".into(),
            professional_id: "pro-ana".into(),
            start: date.and_time(t(14, 0)).and_utc(),
            end: date.and_time(t(15, 0)).and_utc(),
            reason: None,
        });

        let ana = data.professional("pro-ana").unwrap().clone();
        let query = AvailabilityQuery {
            date,
            service_id: Some("svc-manutencao".into()),
        };
        let availability = day_availability(&data, &ana, &query, Utc::now());
        let free = |h, m| {
            availability
                .slots
                .iter()
                .find(|s| s.time == t(h, m))
                .map(|s| s.available)
        };

        assert_eq!(free(9, 0), Some(true));
        assert_eq!(free(9, 30), Some(false));
        assert_eq!(free(10, 30), Some(false));
        assert_eq!(free(11, 0), Some(true));
        assert_eq!(free(14, 0), Some(false));
        assert_eq!(free(15, 0), Some(true));
        // 60-minute service must end by 18:00
        assert_eq!(free(17, 0), Some(true));
        assert_eq!(free(17, 30), None);
    }

    #[test]
    fn test_closed_day_has_no_slots() {
        let data = fixtures::seed();
        let ana = data.professional("pro-ana").unwrap().clone();
        let mut sunday = next_monday() - Duration::days(1);
        if sunday <= Utc::now().date_naive() {
            sunday += Duration::days(7);
        }
        let query = AvailabilityQuery {
            date: sunday,
            service_id: None,
        };
        assert!(day_availability(&data, &ana, &query, Utc::now()).slots.is_empty());
    }

    #[test]
    fn test_clamp_to_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let before = date.and_time(t(22, 0)).and_utc() - Duration::days(1);
        assert_eq!(
            clamp_to_day(date, before, date.and_time(t(1, 0)).and_utc()),
            Some((NaiveTime::MIN, t(1, 0)))
        );
        assert_eq!(
            clamp_to_day(date, before, date.and_time(t(0, 0)).and_utc()),
            None
        );
    }
}
