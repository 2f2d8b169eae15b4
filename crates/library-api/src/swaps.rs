//! Swap Engine API (§4.3, §6): execute (honoring `validate_only`), rollback,
//! and the read surface including the entity-scoped listing endpoint.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use library_core::problemdetails::Problem;
use library_entities::dto::{Page, SwapListQuery, SwapRequest, SwapResponse, SwapRollbackRequest};
use library_entities::swap;
use library_entities::types::SwapStatus;
use library_events::BusTransport;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

use crate::state::{normalize_pagination, AppState};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SwapListParams {
    pub entity_id: Option<i32>,
    pub status: Option<SwapStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EntityScopedListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(list_swaps, get_swap, create_swap, rollback_swap, swaps_for_entity),
    components(schemas(
        SwapRequest,
        SwapResponse,
        SwapRollbackRequest,
        SwapListParams,
        swap::Model,
        Page<swap::Model>,
    )),
    info(
        title = "Strategy Library Swaps API",
        description = "Atomic hot-swap of an entity's active deployments onto another entity, with a validate-only dry run and deterministic rollback.",
        version = "1.0.0"
    )
)]
pub struct SwapsApiDoc;

pub fn configure_routes<T>() -> Router<Arc<AppState<T>>>
where
    T: BusTransport + Send + Sync + 'static,
{
    Router::new()
        .route("/swaps", get(list_swaps).post(create_swap))
        .route("/swaps/{id}", get(get_swap))
        .route("/swaps/{id}/rollback", post(rollback_swap))
        .route("/swaps/entity/{entity_id}/swaps", get(swaps_for_entity))
}

#[utoipa::path(
    tag = "Swaps",
    get,
    path = "/swaps",
    params(SwapListParams),
    responses((status = 200, description = "Paginated list of swaps", body = Page<swap::Model>))
)]
pub async fn list_swaps<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<SwapListParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let filter = SwapListQuery {
        entity_id: params.entity_id,
        status: params.status,
        page: Some(page),
        page_size: Some(page_size),
    };
    let page = state.registry.list_swaps(filter, page, page_size).await?;
    Ok(Json(page))
}

#[utoipa::path(
    tag = "Swaps",
    get,
    path = "/swaps/{id}",
    params(("id" = i32, Path, description = "Swap id")),
    responses(
        (status = 200, description = "Swap found", body = swap::Model),
        (status = 404, description = "Swap not found"),
    )
)]
pub async fn get_swap<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    let swap = state.registry.get_swap(id).await?;
    Ok(Json(swap))
}

#[utoipa::path(
    tag = "Swaps",
    post,
    path = "/swaps",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "Swap executed, or a validate_only dry run result", body = SwapResponse),
        (status = 404, description = "Either entity not found"),
        (status = 422, description = "Swap compatibility check failed"),
    )
)]
pub async fn create_swap<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Json(req): Json<SwapRequest>,
) -> Result<impl IntoResponse, Problem> {
    let swap_type = req.swap_type.unwrap_or_default();
    let response = state
        .registry
        .execute_swap(
            req.from_entity_id,
            req.to_entity_id,
            req.reason,
            req.initiated_by,
            swap_type,
            req.validate_only,
            req.target_environment,
        )
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    tag = "Swaps",
    post,
    path = "/swaps/{id}/rollback",
    params(("id" = i32, Path, description = "Swap id to roll back")),
    request_body = SwapRollbackRequest,
    responses(
        (status = 200, description = "Swap rolled back", body = swap::Model),
        (status = 400, description = "Swap is not in a rollback-eligible state"),
        (status = 404, description = "Swap not found"),
    )
)]
pub async fn rollback_swap<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
    Json(req): Json<SwapRollbackRequest>,
) -> Result<impl IntoResponse, Problem> {
    let rolled_back = state
        .registry
        .rollback_swap(id, req.reason, req.rolled_back_by)
        .await?;
    Ok(Json(rolled_back))
}

#[utoipa::path(
    tag = "Swaps",
    get,
    path = "/swaps/entity/{entity_id}/swaps",
    params(
        ("entity_id" = i32, Path, description = "Entity id, matched as either side of the swap"),
        EntityScopedListParams,
    ),
    responses((status = 200, description = "Paginated swaps touching the entity", body = Page<swap::Model>))
)]
pub async fn swaps_for_entity<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(entity_id): Path<i32>,
    Query(params): Query<EntityScopedListParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let filter = SwapListQuery {
        entity_id: Some(entity_id),
        status: None,
        page: Some(page),
        page_size: Some(page_size),
    };
    let page = state.registry.list_swaps(filter, page, page_size).await?;
    Ok(Json(page))
}
