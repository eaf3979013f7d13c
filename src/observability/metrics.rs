use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub fare_estimates_total: IntCounterVec,
    pub route_resolutions_total: IntCounterVec,
    pub geocode_lookups_total: IntCounterVec,
    pub fare_estimate_latency_seconds: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let fare_estimates_total = IntCounterVec::new(
            Opts::new("fare_estimates_total", "Fare estimates by pricing strategy"),
            &["strategy"],
        )
        .expect("valid fare_estimates_total metric");

        let route_resolutions_total = IntCounterVec::new(
            Opts::new(
                "route_resolutions_total",
                "Route resolutions by source (routed or estimated)",
            ),
            &["source"],
        )
        .expect("valid route_resolutions_total metric");

        let geocode_lookups_total = IntCounterVec::new(
            Opts::new("geocode_lookups_total", "Geocoder lookups by operation and outcome"),
            &["operation", "outcome"],
        )
        .expect("valid geocode_lookups_total metric");

        let fare_estimate_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "fare_estimate_latency_seconds",
                "Latency of fare estimation in seconds",
            ),
            &["outcome"],
        )
        .expect("valid fare_estimate_latency_seconds metric");

        registry
            .register(Box::new(fare_estimates_total.clone()))
            .expect("register fare_estimates_total");
        registry
            .register(Box::new(route_resolutions_total.clone()))
            .expect("register route_resolutions_total");
        registry
            .register(Box::new(geocode_lookups_total.clone()))
            .expect("register geocode_lookups_total");
        registry
            .register(Box::new(fare_estimate_latency_seconds.clone()))
            .expect("register fare_estimate_latency_seconds");

        Self {
            registry,
            fare_estimates_total,
            route_resolutions_total,
            geocode_lookups_total,
            fare_estimate_latency_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
