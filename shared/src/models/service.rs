//! Service Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hair length tier for services where the client may buy the hair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairLength {
    Small,
    Medium,
    Large,
}

impl HairLength {
    pub const ALL: [HairLength; 3] = [HairLength::Small, HairLength::Medium, HairLength::Large];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Pequeno",
            Self::Medium => "Médio",
            Self::Large => "Grande",
        }
    }
}

/// Per-length price tiers for provided hair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HairPrices {
    #[serde(with = "rust_decimal::serde::float")]
    pub small: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub medium: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub large: Decimal,
}

impl HairPrices {
    pub fn price(&self, length: HairLength) -> Decimal {
        match length {
            HairLength::Small => self.small,
            HairLength::Medium => self.medium,
            HairLength::Large => self.large,
        }
    }
}

/// Service entity, owned by exactly one professional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub professional_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_minutes: u32,
    #[serde(default)]
    pub category: Option<String>,
    /// Present only for services offering provided hair
    #[serde(default)]
    pub hair_prices: Option<HairPrices>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Service {
    pub fn has_hair_option(&self) -> bool {
        self.hair_prices.is_some()
    }

    /// Price of the provided hair for a tier, `None` when the service has no tiers
    pub fn hair_price(&self, length: HairLength) -> Option<Decimal> {
        self.hair_prices.map(|tiers| tiers.price(length))
    }
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_minutes: u32,
    pub category: Option<String>,
    pub hair_prices: Option<HairPrices>,
}

/// Update service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub duration_minutes: Option<u32>,
    pub category: Option<String>,
    pub hair_prices: Option<HairPrices>,
    pub is_active: Option<bool>,
}

impl ServiceUpdate {
    /// Apply the present fields onto a service
    pub fn apply(self, service: &mut Service) {
        if let Some(name) = self.name {
            service.name = name;
        }
        if let Some(description) = self.description {
            service.description = Some(description);
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(duration) = self.duration_minutes {
            service.duration_minutes = duration;
        }
        if let Some(category) = self.category {
            service.category = Some(category);
        }
        if let Some(tiers) = self.hair_prices {
            service.hair_prices = Some(tiers);
        }
        if let Some(active) = self.is_active {
            service.is_active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn braids() -> Service {
        Service {
            id: "1".into(),
            professional_id: "pro-1".into(),
            name: "Box Braids".into(),
            description: None,
            price: Decimal::from(250),
            duration_minutes: 180,
            category: Some("trancas".into()),
            hair_prices: Some(HairPrices {
                small: Decimal::from(60),
                medium: Decimal::from(80),
                large: Decimal::from(120),
            }),
            is_active: true,
        }
    }

    #[test]
    fn test_hair_price_by_tier() {
        let service = braids();
        assert_eq!(service.hair_price(HairLength::Medium), Some(Decimal::from(80)));
        assert_eq!(service.hair_price(HairLength::Large), Some(Decimal::from(120)));

        let plain = Service {
            hair_prices: None,
            ..braids()
        };
        assert!(!plain.has_hair_option());
        assert_eq!(plain.hair_price(HairLength::Small), None);
    }

    #[test]
    fn test_price_is_a_json_number() {
        let json = serde_json::to_value(braids()).unwrap();
        assert_eq!(json["price"], serde_json::json!(250.0));
        assert_eq!(json["hair_prices"]["medium"], serde_json::json!(80.0));

        let back: Service = serde_json::from_value(json).unwrap();
        assert_eq!(back.price, Decimal::from(250));
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut service = braids();
        ServiceUpdate {
            price: Some(Decimal::from(270)),
            is_active: Some(false),
            ..Default::default()
        }
        .apply(&mut service);
        assert_eq!(service.price, Decimal::from(270));
        assert!(!service.is_active);
        assert_eq!(service.name, "Box Braids");
    }
}
