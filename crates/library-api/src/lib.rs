//! API Surface (§6): the axum router, OpenAPI documentation and Swagger UI
//! for the strategy library control plane, built on top of `RegistryService`.

pub mod deployments;
pub mod entities;
pub mod events;
pub mod health;
pub mod state;
pub mod swaps;

use std::sync::Arc;

use axum::Router;
use library_core::openapi::merge_openapi_schemas;
use library_events::BusTransport;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

/// Merges every resource's OpenAPI document into one, mirroring the
/// same-shaped merge the rest of the stack already uses for multi-plugin
/// schema composition.
pub fn openapi_doc() -> utoipa::openapi::OpenApi {
    merge_openapi_schemas(
        entities::EntitiesApiDoc::openapi(),
        vec![
            deployments::DeploymentsApiDoc::openapi(),
            swaps::SwapsApiDoc::openapi(),
            health::HealthApiDoc::openapi(),
            events::EventsApiDoc::openapi(),
        ],
    )
}

/// Assembles the full application router: every resource's routes nested
/// under `api_v1_prefix`, plus Swagger UI serving the merged OpenAPI
/// document, plus the cross-cutting middleware the rest of the stack already
/// layers onto its axum routers (tracing spans, CORS, panic isolation).
pub fn build_router<T>(state: Arc<AppState<T>>, api_v1_prefix: &str) -> Router
where
    T: BusTransport + Send + Sync + 'static,
{
    let api_routes = Router::new()
        .merge(entities::configure_routes())
        .merge(deployments::configure_routes())
        .merge(swaps::configure_routes())
        .merge(health::configure_routes())
        .merge(events::configure_routes())
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(api_v1_prefix, api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi_doc()))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
