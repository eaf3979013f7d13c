use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A curated drop-off point offered to riders with a quoted fare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub estimated_fare: Decimal,
    pub base_price: Decimal,
    pub estimated_distance_km: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
