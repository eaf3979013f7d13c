use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::destination::Destination;
use crate::models::fixed_route::FixedRoute;
use crate::models::pricing::PricingSettings;

/// Pushed to websocket subscribers whenever admin pricing inputs change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingEvent {
    SettingsUpdated { settings: PricingSettings },
    FixedRouteCreated { route: FixedRoute },
    FixedRouteToggled { id: Uuid, is_active: bool },
    FixedRouteDeleted { id: Uuid },
    DestinationUpserted { destination: Destination },
    DestinationDeleted { id: Uuid },
}
