//! Deployment Manager API (§4.2, §6): create/rollback and the read surface,
//! including the entity-scoped listing endpoint.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use library_entities::deployment;
use library_entities::dto::{
    CreateDeploymentRequest, DeploymentListQuery, Page, RollbackDeploymentRequest,
};
use library_entities::types::{DeploymentStatus, Environment};
use library_events::BusTransport;
use library_core::problemdetails::Problem;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

use crate::state::{normalize_pagination, AppState};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DeploymentListParams {
    pub entity_id: Option<i32>,
    pub environment: Option<Environment>,
    pub status: Option<DeploymentStatus>,
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
    paths(
        list_deployments,
        get_deployment,
        create_deployment,
        rollback_deployment,
        deployments_for_entity,
    ),
    components(schemas(
        CreateDeploymentRequest,
        RollbackDeploymentRequest,
        DeploymentListParams,
        deployment::Model,
        Page<deployment::Model>,
    )),
    info(
        title = "Strategy Library Deployments API",
        description = "Deployment lifecycle: create, rollback and query deployments bound to an entity/environment pair.",
        version = "1.0.0"
    )
)]
pub struct DeploymentsApiDoc;

pub fn configure_routes<T>() -> Router<Arc<AppState<T>>>
where
    T: BusTransport + Send + Sync + 'static,
{
    Router::new()
        .route("/deployments", get(list_deployments).post(create_deployment))
        .route("/deployments/{id}", get(get_deployment))
        .route("/deployments/{id}/rollback", post(rollback_deployment))
        .route(
            "/deployments/entity/{entity_id}/deployments",
            get(deployments_for_entity),
        )
}

#[utoipa::path(
    tag = "Deployments",
    get,
    path = "/deployments",
    params(DeploymentListParams),
    responses((status = 200, description = "Paginated list of deployments", body = Page<deployment::Model>))
)]
pub async fn list_deployments<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<DeploymentListParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let filter = DeploymentListQuery {
        entity_id: params.entity_id,
        environment: params.environment,
        status: params.status,
        page: Some(page),
        page_size: Some(page_size),
    };
    let page = state.registry.list_deployments(filter, page, page_size).await?;
    Ok(Json(page))
}

#[utoipa::path(
    tag = "Deployments",
    get,
    path = "/deployments/{id}",
    params(("id" = i32, Path, description = "Deployment id")),
    responses(
        (status = 200, description = "Deployment found", body = deployment::Model),
        (status = 404, description = "Deployment not found"),
    )
)]
pub async fn get_deployment<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    let deployment = state.registry.get_deployment(id).await?;
    Ok(Json(deployment))
}

#[utoipa::path(
    tag = "Deployments",
    post,
    path = "/deployments",
    request_body = CreateDeploymentRequest,
    responses(
        (status = 201, description = "Deployment created", body = deployment::Model),
        (status = 404, description = "Entity not found"),
        (status = 422, description = "Pre-deployment validation failed"),
    )
)]
pub async fn create_deployment<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Json(req): Json<CreateDeploymentRequest>,
) -> Result<impl IntoResponse, Problem> {
    let created = state.registry.create_deployment(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    tag = "Deployments",
    post,
    path = "/deployments/{id}/rollback",
    params(("id" = i32, Path, description = "Deployment id to roll back")),
    request_body = RollbackDeploymentRequest,
    responses(
        (status = 200, description = "Rolled back to the prior deployment", body = deployment::Model),
        (status = 400, description = "No rollback target available"),
        (status = 404, description = "Deployment not found"),
    )
)]
pub async fn rollback_deployment<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(id): Path<i32>,
    Json(req): Json<RollbackDeploymentRequest>,
) -> Result<impl IntoResponse, Problem> {
    let rolled_back = state
        .registry
        .rollback_deployment(id, req.reason, req.rolled_back_by, req.target_deployment_id)
        .await?;
    Ok(Json(rolled_back))
}

#[utoipa::path(
    tag = "Deployments",
    get,
    path = "/deployments/entity/{entity_id}/deployments",
    params(
        ("entity_id" = i32, Path, description = "Entity id"),
        EntityScopedListParams,
    ),
    responses((status = 200, description = "Paginated deployments for the entity", body = Page<deployment::Model>))
)]
pub async fn deployments_for_entity<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Path(entity_id): Path<i32>,
    Query(params): Query<EntityScopedListParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let filter = DeploymentListQuery {
        entity_id: Some(entity_id),
        environment: None,
        status: None,
        page: Some(page),
        page_size: Some(page_size),
    };
    let page = state.registry.list_deployments(filter, page, page_size).await?;
    Ok(Json(page))
}
