//! Store Gateway operations over the `swaps` table.

use library_core::{LibraryError, LibraryResult};
use library_entities::dto::{Page, SwapListQuery};
use library_entities::swap::{self, Entity as SwapEntity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};

use super::pagination::paginate;

pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> LibraryResult<swap::Model> {
    SwapEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| LibraryError::NotFound(format!("swap {id}")))
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    am: swap::ActiveModel,
) -> LibraryResult<swap::Model> {
    Ok(am.insert(conn).await?)
}

pub async fn save<C: ConnectionTrait>(
    conn: &C,
    am: swap::ActiveModel,
) -> LibraryResult<swap::Model> {
    Ok(am.update(conn).await?)
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: SwapListQuery,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<swap::Model>> {
    let mut query = SwapEntity::find();
    if let Some(entity_id) = filter.entity_id {
        query = query.filter(
            sea_orm::Condition::any()
                .add(swap::Column::FromEntityId.eq(entity_id))
                .add(swap::Column::ToEntityId.eq(entity_id)),
        );
    }
    if let Some(status) = filter.status {
        query = query.filter(swap::Column::Status.eq(status));
    }
    query = query.order_by_desc(swap::Column::InitiatedAt);
    paginate(conn, query, page, page_size).await
}

pub async fn list_for_entity<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<swap::Model>> {
    let query = SwapEntity::find()
        .filter(
            sea_orm::Condition::any()
                .add(swap::Column::FromEntityId.eq(entity_id))
                .add(swap::Column::ToEntityId.eq(entity_id)),
        )
        .order_by_desc(swap::Column::InitiatedAt);
    paginate(conn, query, page, page_size).await
}
