//! Appointment API Handlers
//!
//! New bookings are confirmed immediately; there is no payment step in the
//! mock. Status changes go through the same transition table the client
//! uses to offer actions.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;
use shared::Page;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Actor, Appointment, AppointmentAction, AppointmentCreate, AppointmentQuery, AppointmentStatus,
    CancelRequest, NotificationKind, Professional, Service, StatusUpdate,
};
use shared::response::ApiResponse;
use shared::util::new_id;

use crate::api::{invalid_field, ok};
use crate::auth::CurrentUser;
use crate::state::{MockData, MockState};

const PAGE_SIZE: u32 = 50;

/// GET /appointments/ - the caller's bookings as a client
pub async fn list(
    State(state): State<MockState>,
    current: CurrentUser,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<ApiResponse<Page<Appointment>>>> {
    let data = state.read().await;
    Ok(ok(select(&data, &query, |a| a.client_id == current.id)))
}

/// GET /professionals/appointments/ - bookings of the caller's profile
pub async fn list_for_professional(
    State(state): State<MockState>,
    current: CurrentUser,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<ApiResponse<Page<Appointment>>>> {
    let professional_id = current.require_professional()?;
    let data = state.read().await;
    Ok(ok(select(&data, &query, |a| a.professional_id == professional_id)))
}

/// GET /appointments/{id}/ - visible to its client and its professional
pub async fn get_by_id(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let data = state.read().await;
    let appointment = data.appointment(&id)?;
    current
        .actor_for(&appointment.client_id, &appointment.professional_id)
        .ok_or_else(|| AppError::permission_denied("Not your appointment"))?;
    Ok(ok(appointment.clone()))
}

fn select(
    data: &MockData,
    query: &AppointmentQuery,
    owned: impl Fn(&Appointment) -> bool,
) -> Page<Appointment> {
    let mut matching: Vec<Appointment> = data
        .appointments
        .iter()
        .filter(|a| owned(a))
        .filter(|a| query.status.is_none_or(|s| a.status == s))
        .filter(|a| query.date.is_none_or(|d| a.start.date_naive() == d))
        .cloned()
        .collect();
    matching.sort_by_key(|a| a.start);
    Page::paginate(matching, query.page.unwrap_or(1), PAGE_SIZE)
}

/// POST /appointments/
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let now = Utc::now();
    let mut data = state.write().await;
    let professional = data.professional(&payload.professional_id)?.clone();
    let service = professional
        .service(&payload.service_id)
        .filter(|s| s.is_active)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotOffered))?;

    check_request(&professional, &service, &payload, now)?;
    let end = payload.start + Duration::minutes(i64::from(service.duration_minutes));
    check_slot(&data, &professional, payload.start, end)?;

    let total = quote(&professional, &service, &payload);
    if total != payload.expected_total {
        tracing::warn!(expected = %payload.expected_total, %total, "Booking total mismatch");
        return Err(AppError::validation("Price changed, review the booking")
            .with_detail("expected_total", total.to_string()));
    }

    let appointment = Appointment {
        id: new_id(),
        client_id: current.id.clone(),
        client_name: payload.client_name,
        professional_id: professional.id.clone(),
        professional_name: professional.name.clone(),
        service_id: service.id.clone(),
        service_name: service.name.clone(),
        start: payload.start,
        end,
        status: AppointmentStatus::Confirmed,
        total_price: total,
        is_home_service: payload.is_home_service,
        address: payload.address.filter(|_| payload.is_home_service),
        use_own_hair: payload.use_own_hair,
        hair_length: payload.hair_length.filter(|_| !payload.use_own_hair),
        allergies: payload
            .allergies_description
            .filter(|_| payload.has_allergies),
        notes: payload.notes,
        cancel_reason: None,
        created_at: now,
        updated_at: now,
    };
    data.appointments.push(appointment.clone());

    let when = appointment.start.format("%d/%m %H:%M").to_string();
    data.notify(
        &current.id,
        "Agendamento confirmado",
        Some(format!("{} com {} em {}", service.name, professional.name, when)),
        NotificationKind::Appointment,
    );
    if let Some(owner) = data.user_of_professional(&professional.id).map(|u| u.id.clone()) {
        data.notify(
            &owner,
            "Novo agendamento",
            Some(format!("{} em {}", service.name, when)),
            NotificationKind::Appointment,
        );
    }

    tracing::info!(
        appointment_id = %appointment.id,
        professional_id = %professional.id,
        total = %total,
        "Appointment created"
    );
    Ok(ok(appointment))
}

fn check_request(
    professional: &Professional,
    service: &Service,
    payload: &AppointmentCreate,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if payload.start <= now {
        return Err(AppError::new(ErrorCode::AppointmentInPast));
    }
    if payload.is_home_service {
        if !professional.offers_home_service {
            return Err(AppError::new(ErrorCode::HomeServiceUnavailable));
        }
        if payload.address.as_deref().is_none_or(|a| a.trim().is_empty()) {
            return Err(invalid_field("address", "Informe o endereço do atendimento"));
        }
    }
    if service.has_hair_option() && !payload.use_own_hair && payload.hair_length.is_none() {
        return Err(invalid_field("hair_length", "Selecione o tamanho do cabelo"));
    }
    if payload.has_allergies
        && payload
            .allergies_description
            .as_deref()
            .is_none_or(|a| a.trim().is_empty())
    {
        return Err(invalid_field("allergies_description", "Descreva suas alergias"));
    }
    if payload.client_name.trim().is_empty() {
        return Err(invalid_field("client_name", "Informe seu nome"));
    }
    Ok(())
}

/// The service must fit the working hours and not collide with anything
fn check_slot(
    data: &MockData,
    professional: &Professional,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<()> {
    if !professional.working_hours.is_empty() {
        let fits = professional
            .hours_for(start.weekday())
            .filter(|h| h.is_open())
            .and_then(|h| Some((h.opens?, h.closes?)))
            .is_some_and(|(opens, closes)| {
                start.date_naive() == end.date_naive()
                    && start.time() >= opens
                    && end.time() <= closes
            });
        if !fits {
            return Err(AppError::with_message(
                ErrorCode::SlotUnavailable,
                "Outside working hours",
            ));
        }
    }

    let taken = data
        .appointments
        .iter()
        .any(|a| a.professional_id == professional.id && a.overlaps(start, end))
        || data
            .blocks
            .iter()
            .any(|b| b.professional_id == professional.id && b.overlaps(start, end));
    if taken {
        return Err(AppError::new(ErrorCode::SlotUnavailable));
    }
    Ok(())
}

/// Service price plus hair and home-service extras
fn quote(professional: &Professional, service: &Service, payload: &AppointmentCreate) -> Decimal {
    let hair = match (payload.use_own_hair, payload.hair_length) {
        (false, Some(length)) => service.hair_price(length).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };
    let home = if payload.is_home_service {
        professional.home_service_fee
    } else {
        Decimal::ZERO
    };
    service.price + hair + home
}

/// PATCH /appointments/{id}/ - `{"status": "completed" | "no_show" | "cancelled"}`
pub async fn update_status(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let action = match payload.status {
        AppointmentStatus::Completed => AppointmentAction::Complete,
        AppointmentStatus::NoShow => AppointmentAction::MarkNoShow,
        AppointmentStatus::Cancelled => AppointmentAction::Cancel { reason: None },
        other => {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot set status {} directly", other),
            ));
        }
    };
    let mut data = state.write().await;
    Ok(ok(transition(&mut data, &current, &id, action)?))
}

/// PATCH /appointments/{id}/cancel/
pub async fn cancel(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let mut data = state.write().await;
    let action = AppointmentAction::Cancel {
        reason: payload.reason,
    };
    Ok(ok(transition(&mut data, &current, &id, action)?))
}

fn transition(
    data: &mut MockData,
    current: &CurrentUser,
    id: &str,
    action: AppointmentAction,
) -> AppResult<Appointment> {
    let appointment = data.appointment_mut(id)?;
    let actor = current
        .actor_for(&appointment.client_id, &appointment.professional_id)
        .ok_or_else(|| AppError::permission_denied("Not your appointment"))?;

    if !action.allowed(appointment.status, actor) {
        tracing::warn!(
            appointment_id = %id,
            from = %appointment.status,
            to = %action.target(),
            ?actor,
            "Rejected status transition"
        );
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!(
                "Cannot move appointment from {} to {}",
                appointment.status,
                action.target()
            ),
        ));
    }

    appointment.status = action.target();
    appointment.updated_at = Utc::now();
    if let AppointmentAction::Cancel { reason } = action {
        appointment.cancel_reason = reason;
    }
    let updated = appointment.clone();
    tracing::info!(appointment_id = %id, status = %updated.status, ?actor, "Appointment updated");

    if updated.status == AppointmentStatus::Cancelled {
        let counterpart = match actor {
            Actor::Client => data
                .user_of_professional(&updated.professional_id)
                .map(|u| u.id.clone()),
            Actor::Professional => Some(updated.client_id.clone()),
        };
        if let Some(user_id) = counterpart {
            data.notify(
                &user_id,
                "Agendamento cancelado",
                Some(format!(
                    "{} em {}",
                    updated.service_name,
                    updated.start.format("%d/%m %H:%M")
                )),
                NotificationKind::Appointment,
            );
        }
    }
    Ok(updated)
}
