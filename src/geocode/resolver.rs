use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::geo;
use crate::geocode::cache::{Clock, TtlCache};
use crate::models::location::{Coordinate, Place};
use crate::observability::metrics::Metrics;
use crate::providers::geocoding::{GeocodingProvider, SearchBounds};

const MIN_QUERY_CHARS: usize = 3;

/// Address search and reverse geocoding in front of a rate-limited provider.
/// Provider failures degrade to "no data"; only successful answers are cached.
pub struct AddressResolver {
    provider: Arc<dyn GeocodingProvider>,
    bounds: SearchBounds,
    searches: TtlCache<Vec<Place>>,
    reverses: TtlCache<Option<Place>>,
    metrics: Metrics,
}

impl AddressResolver {
    pub fn new(
        provider: Arc<dyn GeocodingProvider>,
        bounds: SearchBounds,
        ttl: Duration,
        clock: Arc<dyn Clock>,
        metrics: Metrics,
    ) -> Self {
        Self {
            provider,
            bounds,
            searches: TtlCache::new(ttl, clock.clone()),
            reverses: TtlCache::new(ttl, clock),
            metrics,
        }
    }

    pub async fn search(&self, query: &str) -> Vec<Place> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let key = search_key(query);
        if let Some(places) = self.searches.get(&key) {
            self.record("search", "hit");
            return places;
        }

        match self.provider.search(query, &self.bounds).await {
            Ok(places) => {
                self.record("search", "miss");
                debug!(query = %query, results = places.len(), "geocoder search");
                self.searches.insert(key, places.clone());
                places
            }
            Err(err) => {
                self.record("search", "error");
                warn!(query = %query, error = %err, "geocoder search failed");
                Vec::new()
            }
        }
    }

    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<Place>, AppError> {
        let point = Coordinate { lat, lng };
        geo::validate(&point)?;

        let key = reverse_key(&point);
        if let Some(place) = self.reverses.get(&key) {
            self.record("reverse", "hit");
            return Ok(place);
        }

        match self.provider.reverse(&point).await {
            Ok(place) => {
                self.record("reverse", "miss");
                self.reverses.insert(key, place.clone());
                Ok(place)
            }
            Err(err) => {
                self.record("reverse", "error");
                warn!(lat, lng, error = %err, "reverse geocoding failed");
                Ok(None)
            }
        }
    }

    pub fn search_cache(&self) -> &TtlCache<Vec<Place>> {
        &self.searches
    }

    pub fn reverse_cache(&self) -> &TtlCache<Option<Place>> {
        &self.reverses
    }

    fn record(&self, operation: &str, outcome: &str) {
        self.metrics
            .geocode_lookups_total
            .with_label_values(&[operation, outcome])
            .inc();
    }
}

pub fn search_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Four decimal places is roughly 11 m, so nearby clicks share an entry.
pub fn reverse_key(point: &Coordinate) -> String {
    format!("{:.4},{:.4}", grid_cell(point.lat), grid_cell(point.lng))
}

/// Snaps to 4 decimal places; adding 0.0 folds -0.0 into 0.0.
fn grid_cell(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0 + 0.0
}
