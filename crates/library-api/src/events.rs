//! Read-only surface over the append-only audit log (§4.5, §6): the only
//! writer of the `events` table is the Event Publisher's post-commit hook.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use library_core::problemdetails::Problem;
use library_entities::dto::{EventListQuery, Page};
use library_entities::event;
use library_entities::types::EventSeverity;
use library_events::BusTransport;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

use crate::state::{normalize_pagination, AppState};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EventListParams {
    pub entity_id: Option<i32>,
    pub deployment_id: Option<i32>,
    pub swap_id: Option<i32>,
    pub severity: Option<EventSeverity>,
    pub event_type: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(list_events),
    components(schemas(EventListParams, event::Model, Page<event::Model>)),
    info(
        title = "Strategy Library Events API",
        description = "Forensic read surface over the audit log the Event Publisher writes on every commit.",
        version = "1.0.0"
    )
)]
pub struct EventsApiDoc;

pub fn configure_routes<T>() -> Router<Arc<AppState<T>>>
where
    T: BusTransport + Send + Sync + 'static,
{
    Router::new().route("/events", get(list_events))
}

#[utoipa::path(
    tag = "Events",
    get,
    path = "/events",
    params(EventListParams),
    responses((status = 200, description = "Paginated audit log entries", body = Page<event::Model>))
)]
pub async fn list_events<T: BusTransport>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<EventListParams>,
) -> Result<impl IntoResponse, Problem> {
    let (page, page_size) = normalize_pagination(params.page, params.page_size, state.page_size_max)?;
    let filter = EventListQuery {
        entity_id: params.entity_id,
        deployment_id: params.deployment_id,
        swap_id: params.swap_id,
        severity: params.severity,
        event_type: params.event_type,
        page: Some(page),
        page_size: Some(page_size),
    };
    let page = state.registry.list_events(filter, page, page_size).await?;
    Ok(Json(page))
}
