use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for any single money amount or rate.
pub const MAX_AMOUNT: i64 = 1_000_000;
/// Upper bound for the surge multiplier.
pub const MAX_SURGE: i64 = 100;

/// Admin-owned pricing snapshot. Every field is required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    pub base_fare: Decimal,
    pub per_km_rate: Decimal,
    pub per_minute_rate: Decimal,
    pub surge_multiplier: Decimal,
    pub minimum_fare: Decimal,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            base_fare: Decimal::from(15),
            per_km_rate: Decimal::from(5),
            per_minute_rate: Decimal::from(2),
            surge_multiplier: Decimal::ONE,
            minimum_fare: Decimal::from(20),
        }
    }
}

impl PricingSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("base_fare", self.base_fare),
            ("per_km_rate", self.per_km_rate),
            ("per_minute_rate", self.per_minute_rate),
            ("minimum_fare", self.minimum_fare),
        ];

        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(AppError::BadRequest(format!("{name} must be >= 0")));
            }
            if value > Decimal::from(MAX_AMOUNT) {
                return Err(AppError::BadRequest(format!(
                    "{name} must be <= {MAX_AMOUNT}"
                )));
            }
        }

        if self.surge_multiplier <= Decimal::ZERO || self.surge_multiplier > Decimal::from(MAX_SURGE) {
            return Err(AppError::BadRequest(format!(
                "surge_multiplier must be > 0 and <= {MAX_SURGE}"
            )));
        }

        Ok(())
    }
}
