use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::location::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedRoute {
    pub id: Uuid,
    pub pickup_name: String,
    pub dropoff_name: String,
    pub pickup_coordinates: Coordinate,
    pub dropoff_coordinates: Coordinate,
    pub fixed_price: Decimal,
    pub tolerance_radius_meters: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
