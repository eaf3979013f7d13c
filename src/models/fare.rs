use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of route resolution. `Routed` came from the routing provider,
/// `Estimated` from the great-circle fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RouteMetrics {
    Routed {
        distance_km: f64,
        duration_min: i64,
        geometry: Vec<[f64; 2]>,
    },
    Estimated {
        distance_km: f64,
        duration_min: i64,
    },
}

impl RouteMetrics {
    pub fn distance_km(&self) -> f64 {
        match self {
            RouteMetrics::Routed { distance_km, .. } | RouteMetrics::Estimated { distance_km, .. } => {
                *distance_km
            }
        }
    }

    pub fn duration_min(&self) -> i64 {
        match self {
            RouteMetrics::Routed { duration_min, .. }
            | RouteMetrics::Estimated { duration_min, .. } => *duration_min,
        }
    }

    pub fn source(&self) -> RouteSource {
        match self {
            RouteMetrics::Routed { .. } => RouteSource::Routed,
            RouteMetrics::Estimated { .. } => RouteSource::Estimated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    Routed,
    Estimated,
}

impl RouteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteSource::Routed => "routed",
            RouteSource::Estimated => "estimated",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareEstimate {
    pub distance_km: f64,
    pub duration_min: i64,
    pub base_fare: Decimal,
    pub distance_charge: Decimal,
    pub time_charge: Decimal,
    pub estimated_fare: Decimal,
    pub is_predefined: bool,
    pub route_source: RouteSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_route_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<[f64; 2]>,
}
