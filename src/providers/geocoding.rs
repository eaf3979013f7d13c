use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ProviderError;
use crate::models::location::{Coordinate, Place};

/// Area and page limits applied to every search request.
#[derive(Debug, Clone)]
pub struct SearchBounds {
    pub country_codes: String,
    pub viewbox: String,
    pub limit: usize,
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn search(&self, query: &str, bounds: &SearchBounds) -> Result<Vec<Place>, ProviderError>;

    /// `Ok(None)` means the provider answered but knows no address there.
    async fn reverse(&self, point: &Coordinate) -> Result<Option<Place>, ProviderError>;
}

/// Client for a Nominatim-compatible search/reverse API.
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimClient {
    /// `client` should already carry the identifying user agent.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        let raw = format!("{}/{path}", self.base_url);
        Url::parse(&raw).map_err(|err| ProviderError::Malformed(format!("bad url {raw}: {err}")))
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, ProviderError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn search(&self, query: &str, bounds: &SearchBounds) -> Result<Vec<Place>, ProviderError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", &bounds.limit.to_string())
            .append_pair("countrycodes", &bounds.country_codes)
            .append_pair("viewbox", &bounds.viewbox)
            .append_pair("bounded", "0");

        let raw: Vec<NominatimPlace> = self.get(url).await?;
        raw.into_iter().map(to_place).collect()
    }

    async fn reverse(&self, point: &Coordinate) -> Result<Option<Place>, ProviderError> {
        let mut url = self.endpoint("reverse")?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &point.lat.to_string())
            .append_pair("lon", &point.lng.to_string());

        let raw: NominatimReverse = self.get(url).await?;
        if raw.error.is_some() {
            return Ok(None);
        }

        match (raw.lat, raw.lon, raw.display_name) {
            (Some(lat), Some(lon), Some(display_name)) => to_place(NominatimPlace {
                lat,
                lon,
                display_name,
            })
            .map(Some),
            _ => Ok(None),
        }
    }
}

fn to_place(raw: NominatimPlace) -> Result<Place, ProviderError> {
    let lat = raw
        .lat
        .parse::<f64>()
        .map_err(|err| ProviderError::Malformed(format!("lat {:?}: {err}", raw.lat)))?;
    let lng = raw
        .lon
        .parse::<f64>()
        .map_err(|err| ProviderError::Malformed(format!("lon {:?}: {err}", raw.lon)))?;

    Ok(Place {
        lat,
        lng,
        display_name: raw.display_name,
    })
}
