//! Professional Model

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::review::Review;
use super::service::Service;

/// Geographic location: a district inside a city zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub district: String,
    pub zone: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Public contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub instagram: Option<String>,
}

/// Opening hours for one weekday; both `None` means closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub weekday: Weekday,
    #[serde(default)]
    pub opens: Option<NaiveTime>,
    #[serde(default)]
    pub closes: Option<NaiveTime>,
}

impl WorkingHours {
    pub fn open(weekday: Weekday, opens: NaiveTime, closes: NaiveTime) -> Self {
        Self {
            weekday,
            opens: Some(opens),
            closes: Some(closes),
        }
    }

    pub fn closed(weekday: Weekday) -> Self {
        Self {
            weekday,
            opens: None,
            closes: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!((self.opens, self.closes), (Some(o), Some(c)) if o < c)
    }
}

/// Professional entity (service provider listed in the marketplace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub profile_image: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub rating: f32,
    pub review_count: u32,
    pub location: Location,
    pub offers_home_service: bool,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub home_service_fee: Decimal,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub working_hours: Vec<WorkingHours>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Category ids the professional works in
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Professional {
    /// Minimum price over active services
    pub fn min_price(&self) -> Option<Decimal> {
        self.services
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.price)
            .min()
    }

    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    pub fn hours_for(&self, weekday: Weekday) -> Option<&WorkingHours> {
        self.working_hours.iter().find(|h| h.weekday == weekday)
    }

    /// Fold a new review into the aggregate rating and count
    pub fn record_review(&mut self, rating: u8) {
        let total = self.rating as f64 * self.review_count as f64 + rating as f64;
        self.review_count += 1;
        let average = total / self.review_count as f64;
        self.rating = ((average * 10.0).round() / 10.0) as f32;
    }

    /// Recompute `categories` from the active services
    pub fn sync_categories(&mut self) {
        let mut categories: Vec<String> = self
            .services
            .iter()
            .filter(|s| s.is_active)
            .filter_map(|s| s.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        self.categories = categories;
    }
}

/// Update profile payload for the professional's own listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalUpdate {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub location: Option<Location>,
    pub offers_home_service: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub home_service_fee: Option<Decimal>,
    pub contact: Option<Contact>,
    pub working_hours: Option<Vec<WorkingHours>>,
}

impl ProfessionalUpdate {
    /// First invalid field, if any
    pub fn invalid_field(&self) -> Option<(&'static str, &'static str)> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Some(("name", "Informe o nome"));
        }
        if self.specialty.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Some(("specialty", "Informe sua especialidade"));
        }
        if self.home_service_fee.is_some_and(|fee| fee < Decimal::ZERO) {
            return Some(("home_service_fee", "A taxa não pode ser negativa"));
        }
        if let Some(hours) = &self.working_hours {
            let half_open = hours.iter().any(|h| h.opens.is_some() != h.closes.is_some());
            let inverted = hours
                .iter()
                .any(|h| matches!((h.opens, h.closes), (Some(o), Some(c)) if o >= c));
            if half_open || inverted {
                return Some(("working_hours", "Horário de funcionamento inválido"));
            }
            let mut days: Vec<u32> = hours
                .iter()
                .map(|h| h.weekday.num_days_from_monday())
                .collect();
            days.sort_unstable();
            days.dedup();
            if days.len() != hours.len() {
                return Some(("working_hours", "Dia da semana repetido"));
            }
        }
        None
    }

    /// Overwrite the fields present in the update
    pub fn apply(self, professional: &mut Professional) {
        if let Some(name) = self.name {
            professional.name = name;
        }
        if let Some(specialty) = self.specialty {
            professional.specialty = specialty;
        }
        if let Some(bio) = self.bio {
            professional.bio = Some(bio);
        }
        if let Some(image) = self.profile_image {
            professional.profile_image = image;
        }
        if let Some(cover) = self.cover_image {
            professional.cover_image = Some(cover);
        }
        if let Some(location) = self.location {
            professional.location = location;
        }
        if let Some(offers) = self.offers_home_service {
            professional.offers_home_service = offers;
        }
        if let Some(fee) = self.home_service_fee {
            professional.home_service_fee = fee;
        }
        if let Some(contact) = self.contact {
            professional.contact = Some(contact);
        }
        if let Some(mut hours) = self.working_hours {
            hours.sort_by_key(|h| h.weekday.num_days_from_monday());
            professional.working_hours = hours;
        }
    }
}
