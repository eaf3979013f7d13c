use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AppError;
use crate::models::pricing::PricingSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct FareBreakdown {
    pub base_fare: Decimal,
    pub distance_charge: Decimal,
    pub time_charge: Decimal,
    pub estimated_fare: Decimal,
}

/// `max(round2((base + km * per_km + min * per_min) * surge), minimum_fare)`.
/// The floor is applied after rounding so the result never dips below it.
pub fn dynamic_fare(
    settings: &PricingSettings,
    distance_km: f64,
    duration_min: i64,
) -> Result<FareBreakdown, AppError> {
    let distance = Decimal::from_f64(distance_km)
        .ok_or_else(|| AppError::Internal(format!("distance {distance_km} is not representable")))?;

    let overflow = || AppError::ConfigUnavailable("pricing settings overflow the fare".to_string());

    let distance_charge = distance
        .checked_mul(settings.per_km_rate)
        .ok_or_else(overflow)?;
    let time_charge = Decimal::from(duration_min)
        .checked_mul(settings.per_minute_rate)
        .ok_or_else(overflow)?;
    let raw_total = settings
        .base_fare
        .checked_add(distance_charge)
        .and_then(|subtotal| subtotal.checked_add(time_charge))
        .and_then(|subtotal| subtotal.checked_mul(settings.surge_multiplier))
        .ok_or_else(overflow)?;

    Ok(FareBreakdown {
        base_fare: settings.base_fare,
        distance_charge: money(distance_charge),
        time_charge: money(time_charge),
        estimated_fare: money(raw_total).max(settings.minimum_fare),
    })
}

pub fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
