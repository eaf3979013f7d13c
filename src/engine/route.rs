use tracing::{debug, warn};

use crate::geo::haversine_km;
use crate::models::fare::RouteMetrics;
use crate::models::location::Coordinate;
use crate::providers::routing::RoutingProvider;

/// Minutes per kilometre assumed when no routed duration is available.
pub const FALLBACK_MINUTES_PER_KM: f64 = 3.0;

/// Asks the routing provider first and falls back to the great-circle
/// distance on any failure. Never fails.
pub async fn resolve_route(
    provider: &dyn RoutingProvider,
    pickup: &Coordinate,
    dropoff: &Coordinate,
) -> RouteMetrics {
    match provider.route(pickup, dropoff).await {
        Ok(leg) => {
            debug!(
                distance_m = leg.distance_meters,
                duration_s = leg.duration_seconds,
                "routing provider answered"
            );
            RouteMetrics::Routed {
                distance_km: leg.distance_meters / 1_000.0,
                duration_min: (leg.duration_seconds / 60.0).round() as i64,
                geometry: leg.geometry,
            }
        }
        Err(err) => {
            warn!(error = %err, "routing unavailable; using haversine estimate");
            estimate_route(pickup, dropoff)
        }
    }
}

pub fn estimate_route(pickup: &Coordinate, dropoff: &Coordinate) -> RouteMetrics {
    let distance_km = haversine_km(pickup, dropoff);
    RouteMetrics::Estimated {
        distance_km,
        duration_min: (distance_km * FALLBACK_MINUTES_PER_KM).round() as i64,
    }
}
