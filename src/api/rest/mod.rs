pub mod admin;
pub mod destinations;
pub mod fares;
pub mod geocode;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(fares::router())
        .merge(geocode::router())
        .merge(admin::router())
        .merge(destinations::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    fixed_routes: Option<usize>,
    cached_searches: usize,
    cached_reverse_lookups: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, fixed_routes) = match state.fixed_routes.list().await {
        Ok(routes) => ("ok", Some(routes.len())),
        Err(err) => {
            warn!(error = %err, "fixed route store unreachable during health check");
            ("degraded", None)
        }
    };

    Json(HealthResponse {
        status,
        fixed_routes,
        cached_searches: state.resolver.search_cache().len(),
        cached_reverse_lookups: state.resolver.reverse_cache().len(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
