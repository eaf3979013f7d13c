use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::fare::FareEstimate;
use crate::models::location::Location;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/fares/estimate", post(estimate_fare))
}

#[derive(Deserialize)]
pub struct EstimateFareRequest {
    pub pickup: Location,
    pub dropoff: Location,
}

async fn estimate_fare(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EstimateFareRequest>,
) -> Result<Json<FareEstimate>, AppError> {
    let estimate = state
        .estimator
        .estimate(&payload.pickup.coordinate, &payload.dropoff.coordinate)
        .await?;

    Ok(Json(estimate))
}
