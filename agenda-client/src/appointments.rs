//! Appointment board
//!
//! Lists appointments and requests status transitions. The next status is
//! never computed locally: on success the entry is replaced by the server's
//! copy, on failure it is left exactly as displayed and one error toast is
//! raised.

use chrono::NaiveDate;
use shared::models::{Actor, Appointment, AppointmentAction, AppointmentQuery, AppointmentStatus};

use crate::api::ApiClient;
use crate::toast::ToastQueue;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct AppointmentBoard {
    api: ApiClient,
    toasts: ToastQueue,
    actor: Actor,
    appointments: Vec<Appointment>,
    last_query: AppointmentQuery,
}

impl AppointmentBoard {
    pub fn new(api: ApiClient, toasts: ToastQueue, actor: Actor) -> Self {
        Self {
            api,
            toasts,
            actor,
            appointments: Vec::new(),
            last_query: AppointmentQuery::default(),
        }
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Appointments with `status`, in list order
    pub fn with_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.status == status).collect()
    }

    /// `GET /appointments/` for the signed-in client
    pub async fn load(&mut self, status: Option<AppointmentStatus>) -> ClientResult<()> {
        let query = AppointmentQuery {
            status,
            ..Default::default()
        };
        self.fetch(query).await
    }

    /// `GET /professionals/appointments/` for the signed-in professional
    pub async fn load_for_professional(
        &mut self,
        status: Option<AppointmentStatus>,
        date: Option<NaiveDate>,
    ) -> ClientResult<()> {
        let query = AppointmentQuery {
            status,
            date,
            ..Default::default()
        };
        self.fetch(query).await
    }

    /// Refetch with the last query
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.fetch(self.last_query.clone()).await
    }

    async fn fetch(&mut self, query: AppointmentQuery) -> ClientResult<()> {
        let result = match self.actor {
            Actor::Client => self.api.list_appointments(&query).await,
            Actor::Professional => self.api.list_professional_appointments(&query).await,
        };
        match result {
            Ok(page) => {
                self.appointments = page.items;
                self.last_query = query;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(actor = ?self.actor, error = %e, "Failed to load appointments");
                self.toasts.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Actions to offer for an appointment
    pub fn actions_for(&self, id: &str) -> Vec<AppointmentAction> {
        self.get(id)
            .map(|a| AppointmentAction::available(a.status, self.actor))
            .unwrap_or_default()
    }

    /// Ask the backend for a transition and reconcile from its answer
    pub async fn request(
        &mut self,
        id: &str,
        action: AppointmentAction,
    ) -> ClientResult<Appointment> {
        let Some(current) = self.get(id) else {
            return Err(ClientError::NotFound(format!("appointment {}", id)));
        };
        if !action.allowed(current.status, self.actor) {
            let err = ClientError::InvalidTransition(format!(
                "Não é possível {} um agendamento {}",
                action_verb(&action),
                status_label(current.status)
            ));
            self.toasts.error(err.user_message());
            return Err(err);
        }

        match self.api.transition_appointment(id, &action).await {
            Ok(updated) => {
                tracing::info!(appointment_id = %id, status = %updated.status, "Appointment updated");
                if let Some(slot) = self.appointments.iter_mut().find(|a| a.id == id) {
                    *slot = updated.clone();
                }
                self.toasts.success(success_message(&action));
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(appointment_id = %id, action = ?action, error = %e, "Transition failed");
                self.toasts.error(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn cancel(&mut self, id: &str, reason: Option<String>) -> ClientResult<Appointment> {
        self.request(id, AppointmentAction::Cancel { reason }).await
    }

    pub async fn complete(&mut self, id: &str) -> ClientResult<Appointment> {
        self.request(id, AppointmentAction::Complete).await
    }

    pub async fn mark_no_show(&mut self, id: &str) -> ClientResult<Appointment> {
        self.request(id, AppointmentAction::MarkNoShow).await
    }
}

fn action_verb(action: &AppointmentAction) -> &'static str {
    match action {
        AppointmentAction::Complete => "concluir",
        AppointmentAction::Cancel { .. } => "cancelar",
        AppointmentAction::MarkNoShow => "marcar falta em",
    }
}

fn success_message(action: &AppointmentAction) -> &'static str {
    match action {
        AppointmentAction::Complete => "Atendimento concluído",
        AppointmentAction::Cancel { .. } => "Agendamento cancelado",
        AppointmentAction::MarkNoShow => "Falta registrada",
    }
}

/// Portuguese label of a status
pub fn status_label(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::PendingPayment => "aguardando pagamento",
        AppointmentStatus::Confirmed => "confirmado",
        AppointmentStatus::Completed => "concluído",
        AppointmentStatus::Cancelled => "cancelado",
        AppointmentStatus::NoShow => "não compareceu",
    }
}
