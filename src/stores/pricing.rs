use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::StoreError;
use crate::models::pricing::PricingSettings;

#[async_trait]
pub trait PricingStore: Send + Sync {
    async fn current(&self) -> Result<PricingSettings, StoreError>;

    async fn replace(&self, settings: PricingSettings) -> Result<PricingSettings, StoreError>;
}

pub struct InMemoryPricingStore {
    settings: RwLock<PricingSettings>,
}

impl InMemoryPricingStore {
    pub fn new(settings: PricingSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl PricingStore for InMemoryPricingStore {
    async fn current(&self) -> Result<PricingSettings, StoreError> {
        Ok(self.settings.read().await.clone())
    }

    async fn replace(&self, settings: PricingSettings) -> Result<PricingSettings, StoreError> {
        let mut guard = self.settings.write().await;
        *guard = settings.clone();
        Ok(settings)
    }
}

/// Reads a fresh snapshot from an upstream settings endpoint on every call.
pub struct HttpPricingStore {
    client: Client,
    url: String,
}

impl HttpPricingStore {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PricingStore for HttpPricingStore {
    async fn current(&self) -> Result<PricingSettings, StoreError> {
        let response = self
            .client
            .get(self.url.as_str())
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(format!("pricing fetch failed: {err}")))?;

        if !response.status().is_success() {
            return Err(StoreError::Unavailable(format!(
                "pricing endpoint returned {}",
                response.status()
            )));
        }

        let settings: PricingSettings = response
            .json()
            .await
            .map_err(|err| StoreError::Unavailable(format!("pricing payload rejected: {err}")))?;

        if let Err(err) = settings.validate() {
            warn!(error = %err, "upstream pricing settings failed validation");
            return Err(StoreError::Unavailable(err.to_string()));
        }

        Ok(settings)
    }

    async fn replace(&self, _settings: PricingSettings) -> Result<PricingSettings, StoreError> {
        Err(StoreError::ReadOnly)
    }
}
