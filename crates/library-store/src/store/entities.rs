//! Store Gateway operations over the `entities` table.
//!
//! Soft-delete is enforced here, not at the database: every default query adds
//! `deleted_at IS NULL` so callers (including the Deployment Manager and Swap
//! Engine in `library-registry`) can never accidentally see a deleted row
//! through this module.

use chrono::Utc;
use library_core::{LibraryError, LibraryResult};
use library_entities::dto::{CreateEntityRequest, EntityListQuery, Page, UpdateEntityRequest};
use library_entities::entity::{self, Entity as EntityRow, Tags};
use library_entities::prelude::LibraryEntity;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::BTreeSet;

use super::pagination::paginate;

/// Predicate applied to every default query: only live (non-soft-deleted) rows.
fn not_deleted() -> Condition {
    Condition::all().add(entity::Column::DeletedAt.is_null())
}

pub async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> LibraryResult<Option<entity::Model>> {
    Ok(LibraryEntity::find()
        .filter(not_deleted())
        .filter(entity::Column::Name.eq(name))
        .one(conn)
        .await?)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> LibraryResult<entity::Model> {
    LibraryEntity::find_by_id(id)
        .filter(not_deleted())
        .one(conn)
        .await?
        .ok_or_else(|| LibraryError::NotFound(format!("entity {id}")))
}

/// Locks the entity row for the duration of the caller's transaction.
///
/// `SELECT ... FOR UPDATE` has no sqlite equivalent, so the lock clause is
/// only added for backends that support it; the in-process sqlite test
/// backend instead relies on sqlite's whole-database write lock during a
/// transaction, which is sufficient for test purposes.
pub async fn lock_for_update<C: ConnectionTrait>(conn: &C, id: i32) -> LibraryResult<entity::Model> {
    let mut query = LibraryEntity::find_by_id(id).filter(not_deleted());
    if conn.get_database_backend() != DatabaseBackend::Sqlite {
        query = query.lock_exclusive();
    }
    query
        .one(conn)
        .await?
        .ok_or_else(|| LibraryError::NotFound(format!("entity {id}")))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    req: CreateEntityRequest,
) -> LibraryResult<entity::Model> {
    if find_by_name(conn, &req.name).await?.is_some() {
        return Err(LibraryError::AlreadyExists(format!(
            "entity named '{}'",
            req.name
        )));
    }

    let am = entity::ActiveModel {
        name: Set(req.name),
        entity_type: Set(req.entity_type),
        category: Set(req.category),
        description: Set(req.description),
        version: Set(req.version),
        author: Set(req.author),
        tags: Set(Tags::from_vec(req.tags)),
        config: Set(req.config.unwrap_or(serde_json::json!({}))),
        parameters: Set(req.parameters.unwrap_or(serde_json::json!({}))),
        requirements: Set(serde_json::to_value(req.requirements).unwrap_or(serde_json::json!([]))),
        status: Set(library_entities::types::EntityStatus::Registered),
        health_status: Set(library_entities::types::HealthStatus::Unknown),
        resource_hints: Set(req.resource_hints.unwrap_or_default()),
        created_by: Set(req.created_by),
        ..Default::default()
    };

    Ok(am.insert(conn).await?)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    req: UpdateEntityRequest,
) -> LibraryResult<entity::Model> {
    let current = get(conn, id).await?;

    if let Some(name) = &req.name {
        if name != &current.name {
            if let Some(existing) = find_by_name(conn, name).await? {
                if existing.id != id {
                    return Err(LibraryError::AlreadyExists(format!(
                        "entity named '{name}'"
                    )));
                }
            }
        }
    }

    if let Some(next_status) = req.status {
        if next_status != current.status && !current.status.can_transition_to(next_status) {
            return Err(LibraryError::InvalidTransition(format!(
                "entity {id}: {} -> {next_status}",
                current.status
            )));
        }
    }

    let mut am: entity::ActiveModel = current.into();
    if let Some(name) = req.name {
        am.name = Set(name);
    }
    if let Some(category) = req.category {
        am.category = Set(Some(category));
    }
    if let Some(description) = req.description {
        am.description = Set(Some(description));
    }
    if let Some(version) = req.version {
        am.version = Set(version);
    }
    if let Some(author) = req.author {
        am.author = Set(Some(author));
    }
    if let Some(tags) = req.tags {
        am.tags = Set(Tags::from_vec(tags));
    }
    if let Some(config) = req.config {
        am.config = Set(config);
    }
    if let Some(parameters) = req.parameters {
        am.parameters = Set(parameters);
    }
    if let Some(requirements) = req.requirements {
        am.requirements = Set(serde_json::to_value(requirements).unwrap_or(serde_json::json!([])));
    }
    if let Some(status) = req.status {
        am.status = Set(status);
    }
    if let Some(health_status) = req.health_status {
        am.health_status = Set(health_status);
    }
    if let Some(hints) = req.resource_hints {
        am.resource_hints = Set(hints);
    }
    if let Some(updated_by) = req.updated_by {
        am.updated_by = Set(Some(updated_by));
    }

    Ok(am.update(conn).await?)
}

/// Raw `ActiveModel` persist, used by the Deployment Manager and Swap Engine
/// to mutate entity fields (status, deployed_at/by, deployment_config)
/// directly as part of their own orchestration, bypassing the
/// transition-checked `update` above which is reserved for the public
/// partial-update endpoint.
pub async fn save<C: ConnectionTrait>(conn: &C, am: entity::ActiveModel) -> LibraryResult<entity::Model> {
    Ok(am.update(conn).await?)
}

pub async fn soft_delete<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    deleted_by: Option<String>,
) -> LibraryResult<entity::Model> {
    let current = get(conn, id).await?;
    let mut am: entity::ActiveModel = current.into();
    am.deleted_at = Set(Some(Utc::now()));
    am.deleted_by = Set(deleted_by);
    Ok(am.update(conn).await?)
}

fn apply_filters(mut query: sea_orm::Select<EntityRow>, filter: &EntityListQuery) -> sea_orm::Select<EntityRow> {
    query = query.filter(not_deleted());
    if let Some(t) = filter.r#type {
        query = query.filter(entity::Column::EntityType.eq(t));
    }
    if let Some(category) = &filter.category {
        query = query.filter(entity::Column::Category.eq(category.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(entity::Column::Status.eq(status));
    }
    if let Some(health) = filter.health_status {
        query = query.filter(entity::Column::HealthStatus.eq(health));
    }
    if let Some(search) = &filter.search {
        let needle = format!("%{}%", search.to_lowercase());
        query = query.filter(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(entity::Column::Name))).like(needle.clone()))
                .add(Expr::expr(Func::lower(Expr::col(entity::Column::Description))).like(needle)),
        );
    }
    query.order_by_desc(entity::Column::CreatedAt)
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: EntityListQuery,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<entity::Model>> {
    let query = apply_filters(LibraryEntity::find(), &filter);

    if filter.tags.is_empty() {
        return paginate(conn, query, page, page_size).await;
    }

    // Tags are stored as a JSON array column; overlap is computed in
    // application code rather than pushed down as SQL, so the full filtered
    // set is fetched and then sliced in memory.
    let wanted: BTreeSet<&str> = filter.tags.iter().map(String::as_str).collect();
    let all = query.all(conn).await?;
    let matching: Vec<_> = all
        .into_iter()
        .filter(|row| row.tags.overlaps(&wanted))
        .collect();
    let total = matching.len() as u64;
    let start = ((page.max(1) - 1) * page_size) as usize;
    let items = matching.into_iter().skip(start).take(page_size as usize).collect();
    Ok(Page {
        items,
        total,
        page,
        page_size,
    })
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    q: Option<String>,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<entity::Model>> {
    let mut query = LibraryEntity::find().filter(not_deleted());
    if let Some(q) = q {
        let needle = format!("%{}%", q.to_lowercase());
        query = query.filter(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(entity::Column::Name))).like(needle.clone()))
                .add(Expr::expr(Func::lower(Expr::col(entity::Column::Description))).like(needle)),
        );
    }
    query = query.order_by_desc(entity::Column::CreatedAt);
    paginate(conn, query, page, page_size).await
}
