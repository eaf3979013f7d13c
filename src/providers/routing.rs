use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{AppError, ProviderError};
use crate::models::location::Coordinate;

/// A single driving route as reported by the routing provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// `[lng, lat]` pairs.
    pub geometry: Vec<[f64; 2]>,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn route(&self, from: &Coordinate, to: &Coordinate) -> Result<RouteLeg, ProviderError>;
}

/// Client for an OSRM-compatible `route/v1` endpoint.
pub struct OsrmClient {
    client: Client,
    base_url: String,
    profile: String,
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<OsrmGeometry>,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

impl OsrmClient {
    pub fn new(client: Client, base_url: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: profile.into(),
        }
    }

    fn route_url(&self, from: &Coordinate, to: &Coordinate) -> Result<Url, AppError> {
        // OSRM takes lng,lat pairs
        let raw = format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url, self.profile, from.lng, from.lat, to.lng, to.lat
        );
        let mut url = Url::parse(&raw)
            .map_err(|err| AppError::Internal(format!("invalid routing url {raw}: {err}")))?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

#[async_trait]
impl RoutingProvider for OsrmClient {
    async fn route(&self, from: &Coordinate, to: &Coordinate) -> Result<RouteLeg, ProviderError> {
        let url = self
            .route_url(from, to)
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        parse_route(body)
    }
}

fn parse_route(body: OsrmResponse) -> Result<RouteLeg, ProviderError> {
    if body.code != "Ok" {
        return Err(ProviderError::Malformed(format!("routing code {}", body.code)));
    }

    let route = body.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;
    if !route.distance.is_finite() || !route.duration.is_finite() || route.distance < 0.0 {
        return Err(ProviderError::Malformed(
            "route distance or duration is not a usable number".to_string(),
        ));
    }

    Ok(RouteLeg {
        distance_meters: route.distance,
        duration_seconds: route.duration.max(0.0),
        geometry: route.geometry.map(|g| g.coordinates).unwrap_or_default(),
    })
}
