use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::engine::matching::find_fixed_route;
use crate::engine::pricing::dynamic_fare;
use crate::engine::route::resolve_route;
use crate::error::AppError;
use crate::geo;
use crate::models::fare::{FareEstimate, RouteMetrics};
use crate::models::location::Coordinate;
use crate::observability::metrics::Metrics;
use crate::providers::routing::RoutingProvider;
use crate::stores::fixed_routes::FixedRouteStore;
use crate::stores::pricing::PricingStore;

/// Turns a pickup/dropoff pair into a priced trip. Reads pricing inputs but
/// never writes them.
pub struct FareEstimator {
    routing: Arc<dyn RoutingProvider>,
    pricing: Arc<dyn PricingStore>,
    fixed_routes: Arc<dyn FixedRouteStore>,
    metrics: Metrics,
}

impl FareEstimator {
    pub fn new(
        routing: Arc<dyn RoutingProvider>,
        pricing: Arc<dyn PricingStore>,
        fixed_routes: Arc<dyn FixedRouteStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            routing,
            pricing,
            fixed_routes,
            metrics,
        }
    }

    pub async fn estimate(
        &self,
        pickup: &Coordinate,
        dropoff: &Coordinate,
    ) -> Result<FareEstimate, AppError> {
        let start = Instant::now();
        let result = self.estimate_inner(pickup, dropoff).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        self.metrics
            .fare_estimate_latency_seconds
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        if let Err(err) = &result {
            error!(error = %err, "fare estimate failed");
        }

        result
    }

    async fn estimate_inner(
        &self,
        pickup: &Coordinate,
        dropoff: &Coordinate,
    ) -> Result<FareEstimate, AppError> {
        geo::validate(pickup)?;
        geo::validate(dropoff)?;

        let routes = self.fixed_routes.active_routes().await?;
        let fixed = find_fixed_route(&routes, pickup, dropoff).cloned();

        let route = resolve_route(self.routing.as_ref(), pickup, dropoff).await;
        self.metrics
            .route_resolutions_total
            .with_label_values(&[route.source().as_str()])
            .inc();

        if let Some(fixed) = fixed {
            self.metrics
                .fare_estimates_total
                .with_label_values(&["fixed"])
                .inc();
            info!(
                fixed_route_id = %fixed.id,
                fare = %fixed.fixed_price,
                "fixed route matched"
            );

            return Ok(FareEstimate {
                distance_km: route.distance_km(),
                duration_min: route.duration_min(),
                base_fare: Decimal::ZERO,
                distance_charge: Decimal::ZERO,
                time_charge: Decimal::ZERO,
                estimated_fare: fixed.fixed_price,
                is_predefined: true,
                route_source: route.source(),
                fixed_route_id: Some(fixed.id),
                geometry: geometry(&route),
            });
        }

        let settings = self.pricing.current().await?;
        let fare = dynamic_fare(&settings, route.distance_km(), route.duration_min())?;

        self.metrics
            .fare_estimates_total
            .with_label_values(&["dynamic"])
            .inc();
        info!(
            distance_km = route.distance_km(),
            duration_min = route.duration_min(),
            source = route.source().as_str(),
            fare = %fare.estimated_fare,
            "dynamic fare computed"
        );

        Ok(FareEstimate {
            distance_km: route.distance_km(),
            duration_min: route.duration_min(),
            base_fare: fare.base_fare,
            distance_charge: fare.distance_charge,
            time_charge: fare.time_charge,
            estimated_fare: fare.estimated_fare,
            is_predefined: false,
            route_source: route.source(),
            fixed_route_id: None,
            geometry: geometry(&route),
        })
    }
}

fn geometry(route: &RouteMetrics) -> Vec<[f64; 2]> {
    match route {
        RouteMetrics::Routed { geometry, .. } => geometry.clone(),
        RouteMetrics::Estimated { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::FareEstimator;
    use crate::error::{AppError, ProviderError, StoreError};
    use crate::models::fare::RouteSource;
    use crate::models::fixed_route::FixedRoute;
    use crate::models::location::Coordinate;
    use crate::models::pricing::PricingSettings;
    use crate::observability::metrics::Metrics;
    use crate::providers::routing::{RouteLeg, RoutingProvider};
    use crate::stores::fixed_routes::{FixedRouteStore, InMemoryFixedRouteStore};
    use crate::stores::pricing::{InMemoryPricingStore, PricingStore};

    const PICKUP: Coordinate = Coordinate {
        lat: -14.42,
        lng: 28.45,
    };
    const DROPOFF: Coordinate = Coordinate {
        lat: -14.41,
        lng: 28.46,
    };

    struct Unreachable;

    #[async_trait]
    impl RoutingProvider for Unreachable {
        async fn route(&self, _: &Coordinate, _: &Coordinate) -> Result<RouteLeg, ProviderError> {
            Err(ProviderError::Status(502))
        }
    }

    struct Routed(f64, f64);

    #[async_trait]
    impl RoutingProvider for Routed {
        async fn route(&self, _: &Coordinate, _: &Coordinate) -> Result<RouteLeg, ProviderError> {
            Ok(RouteLeg {
                distance_meters: self.0,
                duration_seconds: self.1,
                geometry: Vec::new(),
            })
        }
    }

    struct BrokenPricing {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl PricingStore for BrokenPricing {
        async fn current(&self) -> Result<PricingSettings, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn replace(&self, _: PricingSettings) -> Result<PricingSettings, StoreError> {
            Err(StoreError::ReadOnly)
        }
    }

    fn estimator(
        routing: Arc<dyn RoutingProvider>,
        settings: PricingSettings,
        routes: Arc<InMemoryFixedRouteStore>,
    ) -> FareEstimator {
        FareEstimator::new(
            routing,
            Arc::new(InMemoryPricingStore::new(settings)),
            routes,
            Metrics::new(),
        )
    }

    fn campus_route(price: Decimal) -> FixedRoute {
        FixedRoute {
            id: Uuid::from_u128(7),
            pickup_name: "Hostels".to_string(),
            dropoff_name: "Library".to_string(),
            pickup_coordinates: PICKUP,
            dropoff_coordinates: DROPOFF,
            fixed_price: price,
            tolerance_radius_meters: 200,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unreachable_routing_uses_haversine_and_formula() {
        let estimator = estimator(
            Arc::new(Unreachable),
            PricingSettings::default(),
            Arc::new(InMemoryFixedRouteStore::new()),
        );

        let estimate = estimator.estimate(&PICKUP, &DROPOFF).await.unwrap();

        assert_eq!(estimate.route_source, RouteSource::Estimated);
        assert!(!estimate.is_predefined);
        assert!(estimate.distance_km > 1.4 && estimate.distance_km < 1.6);
        assert_eq!(estimate.duration_min, (estimate.distance_km * 3.0).round() as i64);
        assert!(estimate.estimated_fare > Decimal::from(20));
        assert_eq!(
            estimate.estimated_fare,
            estimate.base_fare + estimate.distance_charge + estimate.time_charge
        );
    }

    #[tokio::test]
    async fn floor_applies_when_formula_is_below_minimum() {
        let settings = PricingSettings {
            minimum_fare: Decimal::from(50),
            ..PricingSettings::default()
        };
        let estimator = estimator(
            Arc::new(Unreachable),
            settings,
            Arc::new(InMemoryFixedRouteStore::new()),
        );

        let estimate = estimator.estimate(&PICKUP, &DROPOFF).await.unwrap();
        assert_eq!(estimate.estimated_fare, Decimal::new(5000, 2));
    }

    #[tokio::test]
    async fn routed_duration_comes_from_provider() {
        let estimator = estimator(
            Arc::new(Routed(3_000.0, 600.0)),
            PricingSettings::default(),
            Arc::new(InMemoryFixedRouteStore::new()),
        );

        let estimate = estimator.estimate(&PICKUP, &DROPOFF).await.unwrap();

        assert_eq!(estimate.route_source, RouteSource::Routed);
        assert_eq!(estimate.duration_min, 10);
        // 15 + 3 * 5 + 10 * 2
        assert_eq!(estimate.estimated_fare, Decimal::from(50));
    }

    #[tokio::test]
    async fn fixed_route_price_bypasses_floor() {
        let routes = Arc::new(InMemoryFixedRouteStore::new());
        routes.insert(campus_route(Decimal::new(500, 2))).await.unwrap();
        let estimator = estimator(Arc::new(Unreachable), PricingSettings::default(), routes);

        let estimate = estimator.estimate(&PICKUP, &DROPOFF).await.unwrap();

        assert!(estimate.is_predefined);
        assert_eq!(estimate.estimated_fare, Decimal::new(500, 2));
        assert_eq!(estimate.fixed_route_id, Some(Uuid::from_u128(7)));
        assert!(estimate.distance_km > 1.4);
    }

    #[tokio::test]
    async fn fixed_route_does_not_need_pricing_settings() {
        let routes = Arc::new(InMemoryFixedRouteStore::new());
        routes.insert(campus_route(Decimal::from(30))).await.unwrap();
        let pricing = Arc::new(BrokenPricing {
            reads: AtomicUsize::new(0),
        });
        let estimator =
            FareEstimator::new(Arc::new(Unreachable), pricing.clone(), routes, Metrics::new());

        let estimate = estimator.estimate(&PICKUP, &DROPOFF).await.unwrap();
        assert_eq!(estimate.estimated_fare, Decimal::from(30));
        assert_eq!(pricing.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_pricing_settings_is_config_unavailable() {
        let estimator = FareEstimator::new(
            Arc::new(Unreachable),
            Arc::new(BrokenPricing {
                reads: AtomicUsize::new(0),
            }),
            Arc::new(InMemoryFixedRouteStore::new()),
            Metrics::new(),
        );

        let result = estimator.estimate(&PICKUP, &DROPOFF).await;
        assert!(matches!(result, Err(AppError::ConfigUnavailable(_))));
    }

    #[tokio::test]
    async fn invalid_coordinate_fails_fast() {
        let estimator = estimator(
            Arc::new(Unreachable),
            PricingSettings::default(),
            Arc::new(InMemoryFixedRouteStore::new()),
        );

        let bad = Coordinate {
            lat: f64::NAN,
            lng: 28.45,
        };
        let result = estimator.estimate(&bad, &DROPOFF).await;
        assert!(matches!(result, Err(AppError::InvalidCoordinate(_))));
    }
}
