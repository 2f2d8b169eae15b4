//! Entity API (§4.1, §6): list/get/create/update/soft-delete/search plus the
//! dependency and performance-metric sub-resources.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use library_core::error_builder;
use library_core::problemdetails::Problem;
use library_entities::dto::{
    validate_opaque_object, CreateDependencyRequest, CreateEntityRequest, DependencyView,
    EntityListQuery, Page, PerformanceMetricListQuery, UpdateEntityRequest,
};
use library_entities::entity;
use library_entities::types::{EntityStatus, EntityType, HealthStatus};
use library_events::BusTransport;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

use crate::state::{normalize_pagination, AppState};

/// Query params as they arrive over the wire: `tags` is accepted as a single
/// comma-separated value since the query-string extractor in use here does
/// not fold repeated keys into a `Vec`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EntityListParams {
    pub r#type: Option<EntityType>,
    pub category: Option<String>,
    pub status: Option<EntityStatus>,
    pub health_status: Option<HealthStatus>,
    pub search: Option<String>,
    pub tags: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

fn split_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DeleteEntityParams {
    pub deleted_by: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_entities,
        get_entity,
        create_entity,
        update_entity,
        delete_entity,
        search_entities,
        entity_dependencies,
        create_entity_dependency,
        entity_performance,
    ),
    components(schemas(
        CreateEntityRequest,
        UpdateEntityRequest,
        EntityListParams,
        SearchParams,
        CreateDependencyRequest,
        DependencyView,
        entity::Model,
        Page<entity::Model>,
        Page<library_entities::performance_metric::Model>,
    )),
    info(
        title = "Strategy Library Entities API",
        description = "Registry CRUD, search, dependency declaration and performance-metric surface for library entities.",
        version = "1.0.0"
    )
)]
pub struct EntitiesApiDoc;

pub fn configure_routes<T>() -> Router<Arc<AppState<T>>>
where
    T: BusTransport + Send + Sync + 'static,
{
    Router::new()
        .route("/entities", get(list_entities).post(create_entity))
        .route(
            "/entities/{id}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .route("/entities/search/", get(search_entities))
        .route(
            "/entities/{id}/dependencies",
            get(entity_dependencies).post(create_entity_dependency),
        )
        .route("/entities/{id}/performance", get(entity_performance))
}

#[utoipa::path(
    tag = "Entities",
    get,
    path = "/entities",
    params(EntityListParams),
    responses((status = 200, description = "Paginated list of entities", body = Page<entity::Model>))
)]
pub async fn list_entities<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<EntityListParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let filter = EntityListQuery {
        r#type: params.r#type,
        category: params.category,
        status: params.status,
        health_status: params.health_status,
        search: params.search,
        tags: split_tags(params.tags),
        page: Some(page),
        page_size: Some(page_size),
    };
    let page = state.registry.list_entities(filter, page, page_size).await?;
    Ok(Json(page))
}

#[utoipa::path(
    tag = "Entities",
    get,
    path = "/entities/{id}",
    params(("id" = i32, Path, description = "Entity id")),
    responses(
        (status = 200, description = "Entity found", body = entity::Model),
        (status = 404, description = "Entity not found"),
    )
)]
pub async fn get_entity<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    let entity = state.registry.get_entity(id).await?;
    Ok(Json(entity))
}

#[utoipa::path(
    tag = "Entities",
    post,
    path = "/entities",
    request_body = CreateEntityRequest,
    responses(
        (status = 201, description = "Entity registered", body = entity::Model),
        (status = 400, description = "Duplicate name or malformed payload"),
        (status = 422, description = "Validation failed"),
    )
)]
pub async fn create_entity<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Json(req): Json<CreateEntityRequest>,
) -> Result<impl IntoResponse, Problem> {
    validate_opaque_object(&req.config, "config").map_err(|e| error_builder::bad_request().detail(e).build())?;
    validate_opaque_object(&req.parameters, "parameters")
        .map_err(|e| error_builder::bad_request().detail(e).build())?;

    let created = state.registry.create_entity(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    tag = "Entities",
    put,
    path = "/entities/{id}",
    params(("id" = i32, Path, description = "Entity id")),
    request_body = UpdateEntityRequest,
    responses(
        (status = 200, description = "Entity updated", body = entity::Model),
        (status = 404, description = "Entity not found"),
        (status = 400, description = "Duplicate name or malformed payload"),
    )
)]
pub async fn update_entity<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEntityRequest>,
) -> Result<impl IntoResponse, Problem> {
    validate_opaque_object(&req.config, "config").map_err(|e| error_builder::bad_request().detail(e).build())?;
    validate_opaque_object(&req.parameters, "parameters")
        .map_err(|e| error_builder::bad_request().detail(e).build())?;

    let updated = state.registry.update_entity(id, req).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    tag = "Entities",
    delete,
    path = "/entities/{id}",
    params(
        ("id" = i32, Path, description = "Entity id"),
        DeleteEntityParams,
    ),
    responses(
        (status = 204, description = "Entity soft-deleted"),
        (status = 404, description = "Entity not found or already deleted"),
    )
)]
pub async fn delete_entity<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteEntityParams>,
) -> Result<impl IntoResponse, Problem> {
    state.registry.delete_entity(id, params.deleted_by).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    tag = "Entities",
    get,
    path = "/entities/search/",
    params(SearchParams),
    responses((status = 200, description = "Paginated search results", body = Page<entity::Model>))
)]
pub async fn search_entities<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let page = state.registry.search_entities(params.q, page, page_size).await?;
    Ok(Json(page))
}

#[utoipa::path(
    tag = "Entities",
    get,
    path = "/entities/{id}/dependencies",
    params(("id" = i32, Path, description = "Entity id")),
    responses((status = 200, description = "Declared dependencies", body = Vec<DependencyView>))
)]
pub async fn entity_dependencies<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    let deps = state.registry.dependencies_for_entity(id).await?;
    Ok(Json(deps))
}

#[utoipa::path(
    tag = "Entities",
    post,
    path = "/entities/{id}/dependencies",
    params(("id" = i32, Path, description = "Entity id")),
    request_body = CreateDependencyRequest,
    responses(
        (status = 201, description = "Dependency declared", body = DependencyView),
        (status = 400, description = "Self-dependency or duplicate edge"),
        (status = 404, description = "Entity or dependency target not found"),
    )
)]
pub async fn create_entity_dependency<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
    Json(req): Json<CreateDependencyRequest>,
) -> Result<impl IntoResponse, Problem> {
    let created = state.registry.declare_dependency(id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    tag = "Entities",
    get,
    path = "/entities/{id}/performance",
    params(
        ("id" = i32, Path, description = "Entity id"),
        PerformanceMetricListQuery,
    ),
    responses((status = 200, description = "Paginated performance metrics, newest first", body = Page<library_entities::performance_metric::Model>))
)]
pub async fn entity_performance<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
    Query(filter): Query<PerformanceMetricListQuery>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(filter.page, filter.page_size, state.page_size_max)?;
    let page = state
        .registry
        .list_performance_metrics(id, filter, page, page_size)
        .await?;
    Ok(Json(page))
}
