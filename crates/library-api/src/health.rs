//! Health introspection (§4.6's readiness note, §6): liveness is a pure
//! process check, readiness composes a store round-trip with the
//! publisher's last known bus connectivity.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use library_entities::dto::{DetailedHealthResponse, HealthResponse};
use library_events::BusTransport;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(liveness, readiness),
    components(schemas(HealthResponse, DetailedHealthResponse)),
    info(
        title = "Strategy Library Health API",
        description = "Liveness and readiness probes for the control plane process.",
        version = "1.0.0"
    )
)]
pub struct HealthApiDoc;

pub fn configure_routes<T>() -> Router<Arc<AppState<T>>>
where
    T: BusTransport + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(liveness))
        .route("/health/detailed", get(readiness))
}

#[utoipa::path(
    tag = "Health",
    get,
    path = "/health",
    responses((status = 200, description = "Process is alive", body = HealthResponse))
)]
pub async fn liveness<T: BusTransport>(State(state): State<Arc<AppState<T>>>) -> impl IntoResponse {
    Json(state.registry.liveness())
}

#[utoipa::path(
    tag = "Health",
    get,
    path = "/health/detailed",
    responses((status = 200, description = "Store and bus connectivity", body = DetailedHealthResponse))
)]
pub async fn readiness<T: BusTransport>(State(state): State<Arc<AppState<T>>>) -> impl IntoResponse {
    Json(state.registry.readiness().await)
}
