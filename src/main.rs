use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ride_fare_service::api;
use ride_fare_service::config::Config;
use ride_fare_service::error::AppError;
use ride_fare_service::geocode::cache::SystemClock;
use ride_fare_service::providers::geocoding::{NominatimClient, SearchBounds};
use ride_fare_service::providers::http_client;
use ride_fare_service::providers::routing::OsrmClient;
use ride_fare_service::state::{AppState, Components};
use ride_fare_service::stores::destinations::InMemoryDestinationStore;
use ride_fare_service::stores::fixed_routes::InMemoryFixedRouteStore;
use ride_fare_service::stores::pricing::{HttpPricingStore, InMemoryPricingStore, PricingStore};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let routing = OsrmClient::new(
        http_client(config.routing.timeout, None)?,
        config.routing.base_url.clone(),
        config.routing.profile.clone(),
    );
    let geocoder = NominatimClient::new(
        http_client(config.geocoder.timeout, Some(config.geocoder.user_agent.as_str()))?,
        config.geocoder.base_url.clone(),
    );

    let pricing: Arc<dyn PricingStore> = match &config.pricing.settings_url {
        Some(url) => {
            tracing::info!(url = %url, "reading pricing settings from upstream");
            Arc::new(HttpPricingStore::new(
                http_client(config.pricing.timeout, None)?,
                url.clone(),
            ))
        }
        None => Arc::new(InMemoryPricingStore::new(config.pricing.defaults.clone())),
    };

    let app_state = AppState::new(Components {
        routing: Arc::new(routing),
        geocoder: Arc::new(geocoder),
        pricing,
        fixed_routes: Arc::new(InMemoryFixedRouteStore::new()),
        destinations: Arc::new(InMemoryDestinationStore::new()),
        clock: Arc::new(SystemClock),
        search_bounds: SearchBounds {
            country_codes: config.geocoder.country_codes.clone(),
            viewbox: config.geocoder.viewbox.clone(),
            limit: config.geocoder.result_limit,
        },
        geocode_cache_ttl: config.geocoder.cache_ttl,
        event_buffer_size: config.event_buffer_size,
    });

    let app = api::rest::router(Arc::new(app_state));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        routing = %config.routing.base_url,
        geocoder = %config.geocoder.base_url,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
