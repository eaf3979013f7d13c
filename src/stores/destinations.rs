use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::destination::Destination;

#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn list(&self, active_only: bool) -> Result<Vec<Destination>, StoreError>;

    async fn insert(&self, destination: Destination) -> Result<Destination, StoreError>;

    /// Replaces the editable fields; `id` and `created_at` are kept from the stored entry.
    async fn update(&self, id: Uuid, destination: Destination) -> Result<Destination, StoreError>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Destination, StoreError>;

    async fn remove(&self, id: Uuid) -> Result<Destination, StoreError>;
}

#[derive(Default)]
pub struct InMemoryDestinationStore {
    destinations: DashMap<Uuid, Destination>,
}

impl InMemoryDestinationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> StoreError {
    StoreError::NotFound(format!("destination {id}"))
}

#[async_trait]
impl DestinationStore for InMemoryDestinationStore {
    async fn list(&self, active_only: bool) -> Result<Vec<Destination>, StoreError> {
        let mut destinations: Vec<Destination> = self
            .destinations
            .iter()
            .filter(|entry| !active_only || entry.value().is_active)
            .map(|entry| entry.value().clone())
            .collect();
        destinations.sort_by_key(|destination| destination.created_at);
        Ok(destinations)
    }

    async fn insert(&self, destination: Destination) -> Result<Destination, StoreError> {
        self.destinations.insert(destination.id, destination.clone());
        Ok(destination)
    }

    async fn update(&self, id: Uuid, destination: Destination) -> Result<Destination, StoreError> {
        let mut stored = self.destinations.get_mut(&id).ok_or_else(|| not_found(id))?;

        *stored = Destination {
            id: stored.id,
            created_at: stored.created_at,
            ..destination
        };
        Ok(stored.clone())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Destination, StoreError> {
        let mut stored = self.destinations.get_mut(&id).ok_or_else(|| not_found(id))?;

        stored.is_active = is_active;
        Ok(stored.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<Destination, StoreError> {
        self.destinations
            .remove(&id)
            .map(|(_, destination)| destination)
            .ok_or_else(|| not_found(id))
    }
}
