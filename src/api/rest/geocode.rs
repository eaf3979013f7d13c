use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::location::Place;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/geocode/search", get(search))
        .route("/geocode/reverse", get(reverse))
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct ReverseParams {
    pub lat: f64,
    pub lng: f64,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Place>> {
    Json(state.resolver.search(&params.q).await)
}

async fn reverse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<Option<Place>>, AppError> {
    let place = state
        .resolver
        .reverse_geocode(params.lat, params.lng)
        .await?;

    Ok(Json(place))
}
