use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, patch};
use axum::Json;
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::geo;
use crate::models::event::PricingEvent;
use crate::models::fixed_route::FixedRoute;
use crate::models::location::Coordinate;
use crate::models::pricing::PricingSettings;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/pricing-settings",
            get(get_pricing_settings).put(update_pricing_settings),
        )
        .route(
            "/admin/fixed-routes",
            get(list_fixed_routes).post(create_fixed_route),
        )
        .route("/admin/fixed-routes/:id/toggle", patch(toggle_fixed_route))
        .route("/admin/fixed-routes/:id", delete(delete_fixed_route))
}

fn default_tolerance() -> u32 {
    500
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateFixedRouteRequest {
    pub pickup_name: String,
    pub dropoff_name: String,
    pub pickup_coordinates: Coordinate,
    pub dropoff_coordinates: Coordinate,
    pub fixed_price: Decimal,
    #[serde(default = "default_tolerance")]
    pub tolerance_radius_meters: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
    pub id: Uuid,
}

async fn get_pricing_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PricingSettings>, AppError> {
    Ok(Json(state.pricing.current().await?))
}

async fn update_pricing_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PricingSettings>,
) -> Result<Json<PricingSettings>, AppError> {
    payload.validate()?;

    let settings = state.pricing.replace(payload).await?;
    info!(
        base_fare = %settings.base_fare,
        surge = %settings.surge_multiplier,
        minimum_fare = %settings.minimum_fare,
        "pricing settings updated"
    );
    state.publish(PricingEvent::SettingsUpdated {
        settings: settings.clone(),
    });

    Ok(Json(settings))
}

async fn list_fixed_routes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FixedRoute>>, AppError> {
    Ok(Json(state.fixed_routes.list().await?))
}

async fn create_fixed_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateFixedRouteRequest>,
) -> Result<Json<FixedRoute>, AppError> {
    if payload.pickup_name.trim().is_empty() || payload.dropoff_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "pickup_name and dropoff_name cannot be empty".to_string(),
        ));
    }

    if payload.fixed_price < Decimal::ZERO {
        return Err(AppError::BadRequest("fixed_price must be >= 0".to_string()));
    }

    if payload.tolerance_radius_meters == 0 {
        return Err(AppError::BadRequest(
            "tolerance_radius_meters must be > 0".to_string(),
        ));
    }

    geo::validate(&payload.pickup_coordinates)?;
    geo::validate(&payload.dropoff_coordinates)?;

    let route = FixedRoute {
        id: Uuid::new_v4(),
        pickup_name: payload.pickup_name.trim().to_string(),
        dropoff_name: payload.dropoff_name.trim().to_string(),
        pickup_coordinates: payload.pickup_coordinates,
        dropoff_coordinates: payload.dropoff_coordinates,
        fixed_price: payload.fixed_price,
        tolerance_radius_meters: payload.tolerance_radius_meters,
        is_active: payload.is_active,
        created_at: Utc::now(),
    };

    let route = state.fixed_routes.insert(route).await?;
    info!(
        fixed_route_id = %route.id,
        pickup = %route.pickup_name,
        dropoff = %route.dropoff_name,
        price = %route.fixed_price,
        "fixed route created"
    );
    state.publish(PricingEvent::FixedRouteCreated {
        route: route.clone(),
    });

    Ok(Json(route))
}

async fn toggle_fixed_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FixedRoute>, AppError> {
    let route = state.fixed_routes.toggle(id).await?;
    state.publish(PricingEvent::FixedRouteToggled {
        id,
        is_active: route.is_active,
    });

    Ok(Json(route))
}

async fn delete_fixed_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.fixed_routes.remove(id).await?;
    info!(fixed_route_id = %id, "fixed route deleted");
    state.publish(PricingEvent::FixedRouteDeleted { id });

    Ok(Json(DeletedResponse {
        status: "deleted",
        id,
    }))
}
