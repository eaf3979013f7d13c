use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::engine::estimator::FareEstimator;
use crate::geocode::cache::Clock;
use crate::geocode::resolver::AddressResolver;
use crate::models::event::PricingEvent;
use crate::observability::metrics::Metrics;
use crate::providers::geocoding::{GeocodingProvider, SearchBounds};
use crate::providers::routing::RoutingProvider;
use crate::stores::destinations::DestinationStore;
use crate::stores::fixed_routes::FixedRouteStore;
use crate::stores::pricing::PricingStore;

/// External collaborators the service is composed from.
pub struct Components {
    pub routing: Arc<dyn RoutingProvider>,
    pub geocoder: Arc<dyn GeocodingProvider>,
    pub pricing: Arc<dyn PricingStore>,
    pub fixed_routes: Arc<dyn FixedRouteStore>,
    pub destinations: Arc<dyn DestinationStore>,
    pub clock: Arc<dyn Clock>,
    pub search_bounds: SearchBounds,
    pub geocode_cache_ttl: Duration,
    pub event_buffer_size: usize,
}

pub struct AppState {
    pub estimator: FareEstimator,
    pub resolver: AddressResolver,
    pub pricing: Arc<dyn PricingStore>,
    pub fixed_routes: Arc<dyn FixedRouteStore>,
    pub destinations: Arc<dyn DestinationStore>,
    pub pricing_events_tx: broadcast::Sender<PricingEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(components: Components) -> Self {
        let metrics = Metrics::new();
        let (pricing_events_tx, _unused_rx) = broadcast::channel(components.event_buffer_size);

        let estimator = FareEstimator::new(
            components.routing,
            components.pricing.clone(),
            components.fixed_routes.clone(),
            metrics.clone(),
        );
        let resolver = AddressResolver::new(
            components.geocoder,
            components.search_bounds,
            components.geocode_cache_ttl,
            components.clock,
            metrics.clone(),
        );

        Self {
            estimator,
            resolver,
            pricing: components.pricing,
            fixed_routes: components.fixed_routes,
            destinations: components.destinations,
            pricing_events_tx,
            metrics,
        }
    }

    pub fn publish(&self, event: PricingEvent) {
        // no subscribers is fine
        let _ = self.pricing_events_tx.send(event);
    }
}
