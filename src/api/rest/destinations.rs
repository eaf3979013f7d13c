use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post, put};
use axum::Json;
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::rest::admin::DeletedResponse;
use crate::error::AppError;
use crate::geo;
use crate::models::destination::Destination;
use crate::models::event::PricingEvent;
use crate::models::location::Coordinate;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/destinations", get(list_destinations))
        .route("/admin/destinations", post(create_destination))
        .route(
            "/admin/destinations/:id",
            put(update_destination).delete(delete_destination),
        )
        .route(
            "/admin/popular-destinations/:id",
            patch(set_destination_active),
        )
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default = "default_true")]
    pub active_only: bool,
}

#[derive(Deserialize)]
pub struct ActiveParams {
    pub active: bool,
}

#[derive(Deserialize)]
pub struct DestinationRequest {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub estimated_fare: Decimal,
    #[serde(default)]
    pub base_price: Decimal,
    #[serde(default)]
    pub estimated_distance_km: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl DestinationRequest {
    fn into_destination(self) -> Result<Destination, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name cannot be empty".to_string()));
        }

        if self.estimated_fare < Decimal::ZERO || self.base_price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "estimated_fare and base_price must be >= 0".to_string(),
            ));
        }

        if !self.estimated_distance_km.is_finite() || self.estimated_distance_km < 0.0 {
            return Err(AppError::BadRequest(
                "estimated_distance_km must be a finite value >= 0".to_string(),
            ));
        }

        geo::validate(&Coordinate {
            lat: self.latitude,
            lng: self.longitude,
        })?;

        Ok(Destination {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            estimated_fare: self.estimated_fare,
            base_price: self.base_price,
            estimated_distance_km: self.estimated_distance_km,
            is_active: self.is_active,
            created_at: Utc::now(),
        })
    }
}

async fn list_destinations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Destination>>, AppError> {
    Ok(Json(state.destinations.list(params.active_only).await?))
}

async fn create_destination(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DestinationRequest>,
) -> Result<Json<Destination>, AppError> {
    let destination = state
        .destinations
        .insert(payload.into_destination()?)
        .await?;

    info!(
        destination_id = %destination.id,
        name = %destination.name,
        fare = %destination.estimated_fare,
        "destination created"
    );
    state.publish(PricingEvent::DestinationUpserted {
        destination: destination.clone(),
    });

    Ok(Json(destination))
}

async fn update_destination(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DestinationRequest>,
) -> Result<Json<Destination>, AppError> {
    let destination = state
        .destinations
        .update(id, payload.into_destination()?)
        .await?;

    info!(destination_id = %id, name = %destination.name, "destination updated");
    state.publish(PricingEvent::DestinationUpserted {
        destination: destination.clone(),
    });

    Ok(Json(destination))
}

async fn set_destination_active(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActiveParams>,
) -> Result<Json<Destination>, AppError> {
    let destination = state.destinations.set_active(id, params.active).await?;

    info!(destination_id = %id, is_active = params.active, "destination visibility changed");
    state.publish(PricingEvent::DestinationUpserted {
        destination: destination.clone(),
    });

    Ok(Json(destination))
}

async fn delete_destination(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.destinations.remove(id).await?;
    info!(destination_id = %id, "destination deleted");
    state.publish(PricingEvent::DestinationDeleted { id });

    Ok(Json(DeletedResponse {
        status: "deleted",
        id,
    }))
}
