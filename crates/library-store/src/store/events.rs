//! Store Gateway operations over the `events` table — the append-only audit
//! log written by the Event Publisher's post-commit hook (see `library-events`).

use chrono::Utc;
use library_core::LibraryResult;
use library_entities::dto::{EventListQuery, Page};
use library_entities::event::{self, Entity as EventEntity};
use library_entities::types::EventSeverity;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::Value as Json;

use super::pagination::paginate;

#[allow(clippy::too_many_arguments)]
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    event_type: &str,
    event_category: &str,
    severity: EventSeverity,
    entity_id: Option<i32>,
    deployment_id: Option<i32>,
    swap_id: Option<i32>,
    message: &str,
    details: Json,
    user_id: Option<String>,
    source: &str,
) -> LibraryResult<event::Model> {
    let am = event::ActiveModel {
        event_type: Set(event_type.to_string()),
        event_category: Set(event_category.to_string()),
        severity: Set(severity),
        entity_id: Set(entity_id),
        deployment_id: Set(deployment_id),
        swap_id: Set(swap_id),
        message: Set(message.to_string()),
        details: Set(details),
        user_id: Set(user_id),
        source: Set(source.to_string()),
        occurred_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(am.insert(conn).await?)
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: EventListQuery,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<event::Model>> {
    let mut query = EventEntity::find();
    if let Some(entity_id) = filter.entity_id {
        query = query.filter(event::Column::EntityId.eq(entity_id));
    }
    if let Some(deployment_id) = filter.deployment_id {
        query = query.filter(event::Column::DeploymentId.eq(deployment_id));
    }
    if let Some(swap_id) = filter.swap_id {
        query = query.filter(event::Column::SwapId.eq(swap_id));
    }
    if let Some(severity) = filter.severity {
        query = query.filter(event::Column::Severity.eq(severity));
    }
    if let Some(event_type) = filter.event_type {
        query = query.filter(event::Column::EventType.eq(event_type));
    }
    query = query.order_by_desc(event::Column::OccurredAt);
    paginate(conn, query, page, page_size).await
}
