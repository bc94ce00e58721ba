//! Booking wizard
//!
//! One centralized state object walks the client through
//! `SelectService -> SelectDateTime -> AdditionalOptions -> ClientDetails -> Confirm`,
//! ending in `Completed` once the backend accepted the booking. Each step is
//! validated before advancing. Going back is allowed until the booking is
//! completed, and the total is recomputed from the draft on every read.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Appointment, AppointmentCreate, HairLength, Professional, Service, User};
use validator::Validate;

use crate::api::ApiClient;
use crate::calendar::slot_window;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    SelectService,
    SelectDateTime,
    AdditionalOptions,
    ClientDetails,
    Confirm,
    /// Terminal: the booking went through
    Completed,
}

impl BookingStep {
    /// Steps that collect input, in order
    pub const ALL: [BookingStep; 5] = [
        Self::SelectService,
        Self::SelectDateTime,
        Self::AdditionalOptions,
        Self::ClientDetails,
        Self::Confirm,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SelectService => "Serviço",
            Self::SelectDateTime => "Data e horário",
            Self::AdditionalOptions => "Opções",
            Self::ClientDetails => "Seus dados",
            Self::Confirm => "Confirmação",
            Self::Completed => "Agendamento confirmado",
        }
    }
}

/// Extras chosen in the options step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOptions {
    pub use_own_hair: bool,
    pub hair_length: Option<HairLength>,
    pub is_home_service: bool,
    pub address: Option<String>,
    pub has_allergies: bool,
    pub allergies_description: Option<String>,
}

impl Default for BookingOptions {
    fn default() -> Self {
        Self {
            use_own_hair: true,
            hair_length: None,
            is_home_service: false,
            address: None,
            has_allergies: false,
            allergies_description: None,
        }
    }
}

/// Contact data of the person being served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ClientDetails {
    #[validate(length(min = 2, message = "Informe seu nome"))]
    pub name: String,
    #[validate(length(min = 10, max = 20, message = "Telefone inválido"))]
    pub phone: String,
    #[validate(email(message = "E-mail inválido"))]
    pub email: String,
    #[validate(length(max = 500, message = "Observações muito longas"))]
    pub notes: Option<String>,
}

impl ClientDetails {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            notes: None,
        }
    }
}

/// Everything collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub options: BookingOptions,
    pub client: Option<ClientDetails>,
}

/// Line items of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriceBreakdown {
    pub service: Decimal,
    pub home_service_fee: Decimal,
    pub hair: Decimal,
}

impl PriceBreakdown {
    pub fn total(&self) -> Decimal {
        self.service + self.home_service_fee + self.hair
    }
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    professional: Professional,
    step: BookingStep,
    draft: BookingDraft,
    completed: Option<Appointment>,
    last_error: Option<String>,
}

impl BookingWizard {
    pub fn new(professional: Professional) -> Self {
        Self {
            professional,
            step: BookingStep::SelectService,
            draft: BookingDraft::default(),
            completed: None,
            last_error: None,
        }
    }

    pub fn professional(&self) -> &Professional {
        &self.professional
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Created appointment once the booking went through
    pub fn completed(&self) -> Option<&Appointment> {
        self.completed.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    /// Inline error of the last failed submit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn service(&self) -> Option<&Service> {
        self.draft
            .service_id
            .as_deref()
            .and_then(|id| self.professional.service(id))
    }

    // ---- inputs ----

    pub fn select_service(&mut self, service_id: &str) -> ClientResult<()> {
        let service = self
            .professional
            .service(service_id)
            .filter(|s| s.is_active)
            .ok_or_else(|| field_error("service_id", "Serviço indisponível"))?;
        let has_hair_option = service.has_hair_option();

        if self.draft.service_id.as_deref() != Some(service_id) {
            // duration may differ, so the chosen slot no longer applies
            self.draft.time = None;
        }
        if !has_hair_option {
            self.draft.options.hair_length = None;
        }
        self.draft.service_id = Some(service_id.to_string());
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        if self.draft.date != Some(date) {
            self.draft.time = None;
        }
        self.draft.date = Some(date);
    }

    pub fn select_time(&mut self, time: NaiveTime) {
        self.draft.time = Some(time);
    }

    pub fn set_options(&mut self, options: BookingOptions) {
        self.draft.options = options;
    }

    pub fn set_client_details(&mut self, details: ClientDetails) {
        self.draft.client = Some(details);
    }

    /// Fill the client step from the signed-in user unless already filled
    pub fn prefill_client(&mut self, user: &User) {
        if self.draft.client.is_none() {
            self.draft.client = Some(ClientDetails::from_user(user));
        }
        if self.draft.options.address.is_none() {
            self.draft.options.address = user.default_address().map(|a| a.one_line());
        }
    }

    // ---- navigation ----

    /// Validate the current step and advance; stays put at `Confirm`
    pub fn next(&mut self) -> ClientResult<BookingStep> {
        self.validate_step(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Always allowed before completion; no-op at the first step
    pub fn back(&mut self) -> BookingStep {
        if self.step == BookingStep::Completed {
            return self.step;
        }
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Jump back freely; jump forward only if every earlier step validates
    pub fn go_to(&mut self, step: BookingStep) -> ClientResult<BookingStep> {
        if self.step == BookingStep::Completed {
            return Ok(self.step);
        }
        if step == BookingStep::Completed {
            return Err(ClientError::BookingIncomplete(
                "Confirme o agendamento para concluir".into(),
            ));
        }
        if step > self.step {
            for earlier in BookingStep::ALL.iter().take(step.index()) {
                self.validate_step(*earlier)?;
            }
        }
        self.step = step;
        Ok(self.step)
    }

    pub fn reset(&mut self) {
        self.step = BookingStep::SelectService;
        self.draft = BookingDraft::default();
        self.completed = None;
        self.last_error = None;
    }

    // ---- pricing ----

    pub fn price_breakdown(&self) -> PriceBreakdown {
        let Some(service) = self.service() else {
            return PriceBreakdown::default();
        };
        let options = &self.draft.options;
        let home_service_fee = if options.is_home_service {
            self.professional.home_service_fee
        } else {
            Decimal::ZERO
        };
        let hair = match (options.use_own_hair, options.hair_length) {
            (false, Some(length)) => service.hair_price(length).unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        };
        PriceBreakdown {
            service: service.price,
            home_service_fee,
            hair,
        }
    }

    /// `service.price + home fee (if home service) + hair price (if not own hair)`
    pub fn total(&self) -> Decimal {
        self.price_breakdown().total()
    }

    // ---- validation ----

    pub fn validate_step(&self, step: BookingStep) -> ClientResult<()> {
        match step {
            BookingStep::SelectService => {
                if self.service().is_none() {
                    return Err(field_error("service_id", "Selecione um serviço"));
                }
            }
            BookingStep::SelectDateTime => self.validate_date_time()?,
            BookingStep::AdditionalOptions => self.validate_options()?,
            BookingStep::ClientDetails => match &self.draft.client {
                Some(details) => details.validate()?,
                None => return Err(field_error("name", "Informe seus dados")),
            },
            BookingStep::Confirm | BookingStep::Completed => {}
        }
        Ok(())
    }

    fn validate_date_time(&self) -> ClientResult<()> {
        let date = self
            .draft
            .date
            .ok_or_else(|| field_error("date", "Selecione uma data"))?;
        if self.draft.time.is_none() {
            return Err(field_error("time", "Selecione um horário"));
        }
        if date < Utc::now().date_naive() {
            return Err(field_error("date", "Escolha uma data futura"));
        }
        let hours = &self.professional.working_hours;
        if !hours.is_empty()
            && !hours
                .iter()
                .any(|h| h.weekday == date.weekday() && h.is_open())
        {
            return Err(field_error("date", "O profissional não atende neste dia"));
        }
        Ok(())
    }

    fn validate_options(&self) -> ClientResult<()> {
        let options = &self.draft.options;
        let needs_hair = self.service().is_some_and(|s| s.has_hair_option());
        if needs_hair && !options.use_own_hair && options.hair_length.is_none() {
            return Err(field_error("hair_length", "Selecione o tamanho do cabelo"));
        }
        if options.is_home_service {
            if !self.professional.offers_home_service {
                return Err(field_error(
                    "is_home_service",
                    "Este profissional não atende em domicílio",
                ));
            }
            if options.address.as_deref().is_none_or(|a| a.trim().is_empty()) {
                return Err(field_error("address", "Informe o endereço do atendimento"));
            }
        }
        if options.has_allergies
            && options
                .allergies_description
                .as_deref()
                .is_none_or(|a| a.trim().is_empty())
        {
            return Err(field_error("allergies_description", "Descreva suas alergias"));
        }
        Ok(())
    }

    /// POST body for the current draft; every step must validate
    pub fn to_request(&self) -> ClientResult<AppointmentCreate> {
        for step in BookingStep::ALL {
            self.validate_step(step)
                .map_err(|e| ClientError::BookingIncomplete(e.user_message()))?;
        }
        let incomplete = || ClientError::BookingIncomplete("Agendamento incompleto".into());

        let service = self.service().ok_or_else(incomplete)?;
        let date = self.draft.date.ok_or_else(incomplete)?;
        let time = self.draft.time.ok_or_else(incomplete)?;
        let client = self.draft.client.as_ref().ok_or_else(incomplete)?;
        let options = &self.draft.options;
        let (start, _) = slot_window(date, time, service.duration_minutes);

        Ok(AppointmentCreate {
            professional_id: self.professional.id.clone(),
            service_id: service.id.clone(),
            start,
            use_own_hair: options.use_own_hair,
            hair_length: if options.use_own_hair {
                None
            } else {
                options.hair_length
            },
            is_home_service: options.is_home_service,
            address: options
                .address
                .clone()
                .filter(|_| options.is_home_service),
            has_allergies: options.has_allergies,
            allergies_description: options
                .allergies_description
                .clone()
                .filter(|_| options.has_allergies),
            client_name: client.name.clone(),
            client_phone: client.phone.clone(),
            client_email: client.email.clone(),
            notes: client.notes.clone(),
            expected_total: self.total(),
        })
    }

    /// Create the appointment
    ///
    /// An incomplete draft is rejected before any request is made. On failure
    /// the draft and step are kept and `last_error` is set; nothing is retried.
    pub async fn submit(&mut self, api: &ApiClient) -> ClientResult<Appointment> {
        if let Some(done) = &self.completed {
            return Ok(done.clone());
        }

        let request = match self.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        match api.create_appointment(&request).await {
            Ok(appointment) => {
                tracing::info!(
                    appointment_id = %appointment.id,
                    professional_id = %request.professional_id,
                    total = %appointment.total_price,
                    "Booking created"
                );
                self.last_error = None;
                self.step = BookingStep::Completed;
                self.completed = Some(appointment.clone());
                Ok(appointment)
            }
            Err(e) => {
                tracing::warn!(professional_id = %request.professional_id, error = %e, "Booking failed");
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

fn field_error(field: &str, message: &str) -> ClientError {
    let mut fields = BTreeMap::new();
    fields.insert(field.to_string(), message.to_string());
    ClientError::Validation {
        message: message.to_string(),
        fields,
    }
}
