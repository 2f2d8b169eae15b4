//! Store Gateway operations over the `deployments` table.

use library_core::{LibraryError, LibraryResult};
use library_entities::deployment::{self, Entity as DeploymentEntity};
use library_entities::dto::{DeploymentListQuery, Page};
use library_entities::types::{DeploymentStatus, Environment};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::pagination::paginate;

pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> LibraryResult<deployment::Model> {
    DeploymentEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| LibraryError::NotFound(format!("deployment {id}")))
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    am: deployment::ActiveModel,
) -> LibraryResult<deployment::Model> {
    Ok(am.insert(conn).await?)
}

pub async fn save<C: ConnectionTrait>(
    conn: &C,
    am: deployment::ActiveModel,
) -> LibraryResult<deployment::Model> {
    Ok(am.update(conn).await?)
}

/// All deployments of `entity_id` in `environment` currently `active`.
/// Per the at-most-one-active invariant this returns at most one row in a
/// healthy database, but the swap engine treats it as a set to stay correct
/// even if that invariant were ever violated by an external write.
pub async fn list_active_for_env<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    environment: Environment,
) -> LibraryResult<Vec<deployment::Model>> {
    Ok(DeploymentEntity::find()
        .filter(deployment::Column::EntityId.eq(entity_id))
        .filter(deployment::Column::Environment.eq(environment))
        .filter(deployment::Column::Status.eq(DeploymentStatus::Active))
        .all(conn)
        .await?)
}

/// Any deployment (regardless of status) of `entity_id` in `environment`,
/// used by the swap engine to decide between reactivating an existing row
/// and materializing a new one.
pub async fn find_any_for_env<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    environment: Environment,
) -> LibraryResult<Option<deployment::Model>> {
    Ok(DeploymentEntity::find()
        .filter(deployment::Column::EntityId.eq(entity_id))
        .filter(deployment::Column::Environment.eq(environment))
        .order_by_desc(deployment::Column::DeployedAt)
        .one(conn)
        .await?)
}

/// The most recently deployed row of `entity_id`/`environment` whose
/// `deployed_at` precedes `before`, excluding `exclude_id` — the rollback
/// target search of §4.2.
pub async fn find_previous_active<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    environment: Environment,
    before: library_core::UtcDateTime,
    exclude_id: i32,
) -> LibraryResult<Option<deployment::Model>> {
    Ok(DeploymentEntity::find()
        .filter(deployment::Column::EntityId.eq(entity_id))
        .filter(deployment::Column::Environment.eq(environment))
        .filter(deployment::Column::Id.ne(exclude_id))
        .filter(deployment::Column::DeployedAt.lt(before))
        .order_by_desc(deployment::Column::DeployedAt)
        .one(conn)
        .await?)
}

/// Every currently-active deployment of `entity_id`, across all
/// environments — used by the Swap Engine to collect the set of deployments
/// a swap touches when no `target_environment` scope is given.
pub async fn list_active_for_entity<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
) -> LibraryResult<Vec<deployment::Model>> {
    Ok(DeploymentEntity::find()
        .filter(deployment::Column::EntityId.eq(entity_id))
        .filter(deployment::Column::Status.eq(DeploymentStatus::Active))
        .all(conn)
        .await?)
}

pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    status: DeploymentStatus,
) -> LibraryResult<deployment::Model> {
    let current = get(conn, id).await?;
    let mut am: deployment::ActiveModel = current.into();
    am.status = Set(status);
    Ok(am.update(conn).await?)
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: DeploymentListQuery,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<deployment::Model>> {
    let mut query = DeploymentEntity::find();
    if let Some(entity_id) = filter.entity_id {
        query = query.filter(deployment::Column::EntityId.eq(entity_id));
    }
    if let Some(environment) = filter.environment {
        query = query.filter(deployment::Column::Environment.eq(environment));
    }
    if let Some(status) = filter.status {
        query = query.filter(deployment::Column::Status.eq(status));
    }
    query = query.order_by_desc(deployment::Column::CreatedAt);
    paginate(conn, query, page, page_size).await
}

pub async fn list_for_entity<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<deployment::Model>> {
    let query = DeploymentEntity::find()
        .filter(deployment::Column::EntityId.eq(entity_id))
        .order_by_desc(deployment::Column::CreatedAt);
    paginate(conn, query, page, page_size).await
}
