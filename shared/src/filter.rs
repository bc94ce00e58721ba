//! Directory filter composition
//!
//! Each dimension of [`FilterState`] is an independent predicate; a
//! professional is visible when every active predicate accepts it. Empty
//! dimensions are no-ops. Source order is preserved.
//!
//! The mock backend converts the `GET /professionals/` query string into a
//! [`FilterQuery`] and runs the same [`apply_filters`] the client uses.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Professional;
use crate::util::contains_ignore_case;

/// Inclusive price bounds matched against [`Professional::min_price`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Ephemeral directory filter selections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub zones: BTreeSet<String>,
    #[serde(default)]
    pub districts: BTreeSet<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub min_rating: Option<f32>,
    /// `Some(true)` keeps only home-service professionals, `Some(false)` only studio ones
    #[serde(default)]
    pub home_service: Option<bool>,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zones.insert(zone.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.districts.insert(district.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn with_min_rating(mut self, rating: f32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn with_home_service(mut self, home_service: bool) -> Self {
        self.home_service = Some(home_service);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Toggle a zone on or off
    pub fn toggle_zone(&mut self, zone: &str) {
        if !self.zones.remove(zone) {
            self.zones.insert(zone.to_string());
        }
    }

    pub fn toggle_district(&mut self, district: &str) {
        if !self.districts.remove(district) {
            self.districts.insert(district.to_string());
        }
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    /// Number of active dimensions (selected zones, districts and categories count individually)
    pub fn active_filter_count(&self) -> usize {
        let mut count = self.zones.len() + self.districts.len() + self.categories.len();
        if self.price_range.is_some() {
            count += 1;
        }
        if self.min_rating.is_some() {
            count += 1;
        }
        if self.home_service.is_some() {
            count += 1;
        }
        if !self.search.trim().is_empty() {
            count += 1;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop selections that are not in the known option lists
    pub fn retain_known(&mut self, catalog: &FilterCatalog) {
        self.zones.retain(|z| catalog.zones.contains_key(z));
        self.districts.retain(|d| catalog.has_district(d));
        self.categories.retain(|c| catalog.categories.contains(c));
    }

    /// Whether a single professional passes every active predicate
    pub fn matches(&self, professional: &Professional) -> bool {
        self.matches_zone(professional)
            && self.matches_district(professional)
            && self.matches_category(professional)
            && self.matches_price(professional)
            && self.matches_rating(professional)
            && self.matches_home_service(professional)
            && self.matches_search(professional)
    }

    fn matches_zone(&self, p: &Professional) -> bool {
        self.zones.is_empty() || self.zones.contains(&p.location.zone)
    }

    fn matches_district(&self, p: &Professional) -> bool {
        self.districts.is_empty() || self.districts.contains(&p.location.district)
    }

    fn matches_category(&self, p: &Professional) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        p.categories.iter().any(|c| self.categories.contains(c))
            || p.services
                .iter()
                .filter(|s| s.is_active)
                .filter_map(|s| s.category.as_ref())
                .any(|c| self.categories.contains(c))
    }

    fn matches_price(&self, p: &Professional) -> bool {
        match self.price_range {
            None => true,
            Some(range) => p.min_price().is_some_and(|price| range.contains(price)),
        }
    }

    fn matches_rating(&self, p: &Professional) -> bool {
        self.min_rating.is_none_or(|min| p.rating >= min)
    }

    fn matches_home_service(&self, p: &Professional) -> bool {
        self.home_service
            .is_none_or(|wanted| p.offers_home_service == wanted)
    }

    fn matches_search(&self, p: &Professional) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        contains_ignore_case(&p.name, term)
            || contains_ignore_case(&p.specialty, term)
            || p.services.iter().any(|s| contains_ignore_case(&s.name, term))
    }

    /// Query-string form used by `GET /professionals/`
    pub fn to_query(&self) -> FilterQuery {
        fn join(set: &BTreeSet<String>) -> Option<String> {
            if set.is_empty() {
                None
            } else {
                Some(set.iter().cloned().collect::<Vec<_>>().join(","))
            }
        }

        let search = self.search.trim();
        FilterQuery {
            zone: join(&self.zones),
            district: join(&self.districts),
            category: join(&self.categories),
            price_min: self.price_range.map(|r| r.min),
            price_max: self.price_range.map(|r| r.max),
            rating: self.min_rating,
            home_service: self.home_service,
            search: (!search.is_empty()).then(|| search.to_string()),
            page: None,
            per_page: None,
        }
    }
}

/// Filter the list, keeping source order
pub fn apply_filters(professionals: &[Professional], filters: &FilterState) -> Vec<Professional> {
    professionals
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}

/// Known option lists: zone -> districts, plus categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCatalog {
    pub zones: BTreeMap<String, BTreeSet<String>>,
    pub categories: BTreeSet<String>,
}

impl FilterCatalog {
    /// Build the catalog from what the loaded professionals actually offer
    pub fn from_professionals(professionals: &[Professional]) -> Self {
        let mut catalog = Self::default();
        for p in professionals {
            catalog
                .zones
                .entry(p.location.zone.clone())
                .or_default()
                .insert(p.location.district.clone());
            catalog.categories.extend(p.categories.iter().cloned());
            catalog
                .categories
                .extend(p.services.iter().filter_map(|s| s.category.clone()));
        }
        catalog
    }

    pub fn has_district(&self, district: &str) -> bool {
        self.zones.values().any(|ds| ds.contains(district))
    }

    /// Districts offered for the selected zones (all districts when no zone is selected)
    pub fn districts_for(&self, zones: &BTreeSet<String>) -> BTreeSet<String> {
        self.zones
            .iter()
            .filter(|(zone, _)| zones.is_empty() || zones.contains(*zone))
            .flat_map(|(_, ds)| ds.iter().cloned())
            .collect()
    }
}

/// Wire form of [`FilterState`] plus paging; list values are comma separated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_min: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_max: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_service: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl FilterQuery {
    pub fn into_state(self) -> FilterState {
        fn split(value: Option<String>) -> BTreeSet<String> {
            value
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        }

        let price_range = match (self.price_min, self.price_max) {
            (None, None) => None,
            (min, max) => Some(PriceRange::new(
                min.unwrap_or(Decimal::ZERO),
                max.unwrap_or(Decimal::MAX),
            )),
        };

        FilterState {
            zones: split(self.zone),
            districts: split(self.district),
            categories: split(self.category),
            price_range,
            min_rating: self.rating,
            home_service: self.home_service,
            search: self.search.unwrap_or_default(),
        }
    }
}
