//! Store Gateway operations over the `performance_metrics` table.
//!
//! Read-only from the API's perspective (the service persists what it is
//! given via `record`; it does not compute the figures itself — computing
//! risk/trading metrics is a non-goal).

use chrono::Utc;
use library_core::LibraryResult;
use library_entities::dto::{Page, PerformanceMetricListQuery};
use library_entities::performance_metric::{self, Entity as PerformanceMetricEntity};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::Value as Json;

use super::pagination::paginate;

pub async fn record<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    deployment_id: Option<i32>,
    metric_name: &str,
    metric_value: f64,
    unit: Option<String>,
    metadata: Json,
) -> LibraryResult<performance_metric::Model> {
    let am = performance_metric::ActiveModel {
        entity_id: Set(entity_id),
        deployment_id: Set(deployment_id),
        metric_name: Set(metric_name.to_string()),
        metric_value: Set(metric_value),
        unit: Set(unit),
        recorded_at: Set(Utc::now()),
        metadata: Set(metadata),
        ..Default::default()
    };
    Ok(am.insert(conn).await?)
}

pub async fn list_for_entity<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    filter: PerformanceMetricListQuery,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<performance_metric::Model>> {
    let _ = filter;
    let query = PerformanceMetricEntity::find()
        .filter(performance_metric::Column::EntityId.eq(entity_id))
        .order_by_desc(performance_metric::Column::RecordedAt);
    paginate(conn, query, page, page_size).await
}
