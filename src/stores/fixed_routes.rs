use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::fixed_route::FixedRoute;

#[async_trait]
pub trait FixedRouteStore: Send + Sync {
    async fn active_routes(&self) -> Result<Vec<FixedRoute>, StoreError>;

    async fn list(&self) -> Result<Vec<FixedRoute>, StoreError>;

    async fn insert(&self, route: FixedRoute) -> Result<FixedRoute, StoreError>;

    async fn toggle(&self, id: Uuid) -> Result<FixedRoute, StoreError>;

    async fn remove(&self, id: Uuid) -> Result<FixedRoute, StoreError>;
}

#[derive(Default)]
pub struct InMemoryFixedRouteStore {
    routes: DashMap<Uuid, FixedRoute>,
}

impl InMemoryFixedRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn sorted(&self, active_only: bool) -> Vec<FixedRoute> {
        let mut routes: Vec<FixedRoute> = self
            .routes
            .iter()
            .filter(|entry| !active_only || entry.value().is_active)
            .map(|entry| entry.value().clone())
            .collect();
        routes.sort_by_key(|route| route.created_at);
        routes
    }
}

#[async_trait]
impl FixedRouteStore for InMemoryFixedRouteStore {
    async fn active_routes(&self) -> Result<Vec<FixedRoute>, StoreError> {
        Ok(self.sorted(true))
    }

    async fn list(&self) -> Result<Vec<FixedRoute>, StoreError> {
        Ok(self.sorted(false))
    }

    async fn insert(&self, route: FixedRoute) -> Result<FixedRoute, StoreError> {
        self.routes.insert(route.id, route.clone());
        Ok(route)
    }

    async fn toggle(&self, id: Uuid) -> Result<FixedRoute, StoreError> {
        let mut route = self
            .routes
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("fixed route {id}")))?;

        route.is_active = !route.is_active;
        Ok(route.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<FixedRoute, StoreError> {
        self.routes
            .remove(&id)
            .map(|(_, route)| route)
            .ok_or_else(|| StoreError::NotFound(format!("fixed route {id}")))
    }
}
