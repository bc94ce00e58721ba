//! Appointment endpoints

use shared::Page;
use shared::models::{
    Appointment, AppointmentAction, AppointmentCreate, AppointmentQuery, CancelRequest,
    StatusUpdate,
};

use super::ApiClient;
use crate::ClientResult;

impl ApiClient {
    /// `POST /appointments/`
    pub async fn create_appointment(
        &self,
        booking: &AppointmentCreate,
    ) -> ClientResult<Appointment> {
        self.post("/appointments/", booking).await
    }

    /// `GET /appointments/`: the signed-in client's appointments
    pub async fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> ClientResult<Page<Appointment>> {
        self.get_query("/appointments/", query).await
    }

    /// `GET /professionals/appointments/`: the signed-in professional's agenda
    pub async fn list_professional_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> ClientResult<Page<Appointment>> {
        self.get_query("/professionals/appointments/", query).await
    }

    /// `GET /appointments/{id}/`
    pub async fn get_appointment(&self, id: &str) -> ClientResult<Appointment> {
        self.get(&format!("/appointments/{}/", id)).await
    }

    /// `PATCH /appointments/{id}/cancel/`
    pub async fn cancel_appointment(
        &self,
        id: &str,
        request: &CancelRequest,
    ) -> ClientResult<Appointment> {
        self.patch(&format!("/appointments/{}/cancel/", id), request).await
    }

    /// `PATCH /appointments/{id}/`
    pub async fn update_appointment_status(
        &self,
        id: &str,
        update: &StatusUpdate,
    ) -> ClientResult<Appointment> {
        self.patch(&format!("/appointments/{}/", id), update).await
    }

    /// Route a transition to its endpoint; the returned appointment is authoritative
    pub async fn transition_appointment(
        &self,
        id: &str,
        action: &AppointmentAction,
    ) -> ClientResult<Appointment> {
        match action {
            AppointmentAction::Cancel { reason } => {
                self.cancel_appointment(
                    id,
                    &CancelRequest {
                        reason: reason.clone(),
                    },
                )
                .await
            }
            other => {
                self.update_appointment_status(
                    id,
                    &StatusUpdate {
                        status: other.target(),
                    },
                )
                .await
            }
        }
    }
}
