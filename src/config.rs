use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::models::pricing::PricingSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub routing: RoutingConfig,
    pub geocoder: GeocoderConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub country_codes: String,
    /// `min_lng,min_lat,max_lng,max_lat`
    pub viewbox: String,
    pub result_limit: usize,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub settings_url: Option<String>,
    pub timeout: Duration,
    pub defaults: PricingSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let fallback = PricingSettings::default();
        let defaults = PricingSettings {
            base_fare: parse_or_default("PRICING_BASE_FARE", fallback.base_fare)?,
            per_km_rate: parse_or_default("PRICING_PER_KM_RATE", fallback.per_km_rate)?,
            per_minute_rate: parse_or_default("PRICING_PER_MINUTE_RATE", fallback.per_minute_rate)?,
            surge_multiplier: parse_or_default(
                "PRICING_SURGE_MULTIPLIER",
                fallback.surge_multiplier,
            )?,
            minimum_fare: parse_or_default("PRICING_MINIMUM_FARE", fallback.minimum_fare)?,
        };
        defaults
            .validate()
            .map_err(|err| AppError::Internal(format!("invalid default pricing: {err}")))?;

        let viewbox = string_or_default("GEOCODER_VIEWBOX", "28.0,-15.0,29.0,-14.0");
        validate_viewbox(&viewbox)?;

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: string_or_default("LOG_LEVEL", "info"),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            routing: RoutingConfig {
                base_url: string_or_default("OSRM_BASE_URL", "http://router.project-osrm.org"),
                profile: string_or_default("ROUTING_PROFILE", "driving"),
                timeout: Duration::from_millis(parse_or_default("ROUTING_TIMEOUT_MS", 5_000)?),
            },
            geocoder: GeocoderConfig {
                base_url: string_or_default(
                    "NOMINATIM_BASE_URL",
                    "https://nominatim.openstreetmap.org",
                ),
                user_agent: string_or_default("GEOCODER_USER_AGENT", "RideFareService/0.1"),
                country_codes: string_or_default("GEOCODER_COUNTRY_CODES", "zm"),
                viewbox,
                result_limit: parse_or_default("GEOCODER_RESULT_LIMIT", 5)?,
                timeout: Duration::from_millis(parse_or_default("GEOCODER_TIMEOUT_MS", 5_000)?),
                cache_ttl: Duration::from_secs(parse_or_default(
                    "GEOCODE_CACHE_TTL_SECS",
                    24 * 60 * 60,
                )?),
            },
            pricing: PricingConfig {
                settings_url: env::var("PRICING_SETTINGS_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
                timeout: Duration::from_millis(parse_or_default("PRICING_TIMEOUT_MS", 3_000)?),
                defaults,
            },
        })
    }
}

fn string_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

fn validate_viewbox(raw: &str) -> Result<(), AppError> {
    let parts: Vec<&str> = raw.split(',').collect();
    let numeric = parts.iter().all(|part| part.trim().parse::<f64>().is_ok());

    if parts.len() != 4 || !numeric {
        return Err(AppError::Internal(format!(
            "invalid GEOCODER_VIEWBOX {raw:?}: expected min_lng,min_lat,max_lng,max_lat"
        )));
    }

    Ok(())
}
