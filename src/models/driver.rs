use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverLocation {
    pub lat: f64,
    pub lng: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
    Busy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub availability: Availability,
    pub price_per_kg: Option<f64>,
    pub location: Option<DriverLocation>,
    pub company_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(name: String, company_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            availability: Availability::Available,
            price_per_kg: None,
            location: None,
            company_id,
            updated_at: Utc::now(),
        }
    }

    /// The driver's rate, if it is usable for pricing an order.
    pub fn valid_price(&self) -> Option<f64> {
        self.price_per_kg
            .filter(|price| price.is_finite() && *price > 0.0)
    }
}
