//! Store Gateway operations over the `dependencies` table.

use library_core::{LibraryError, LibraryResult};
use library_entities::dependency::{self, Entity as DependencyEntity};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
    depends_on_entity_id: i32,
    dependency_type: library_entities::types::DependencyType,
    min_version: Option<String>,
    max_version: Option<String>,
) -> LibraryResult<dependency::Model> {
    if entity_id == depends_on_entity_id {
        return Err(LibraryError::ValidationFailed {
            errors: vec!["an entity cannot depend on itself".to_string()],
            warnings: vec![],
            checks: Default::default(),
        });
    }

    let existing = DependencyEntity::find()
        .filter(dependency::Column::EntityId.eq(entity_id))
        .filter(dependency::Column::DependsOnEntityId.eq(depends_on_entity_id))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Err(LibraryError::AlreadyExists(format!(
            "dependency edge {entity_id} -> {depends_on_entity_id}"
        )));
    }

    let am = dependency::ActiveModel {
        entity_id: Set(entity_id),
        depends_on_entity_id: Set(depends_on_entity_id),
        dependency_type: Set(dependency_type),
        min_version: Set(min_version),
        max_version: Set(max_version),
        status: Set(library_entities::types::DependencyStatus::Active),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    Ok(am.insert(conn).await?)
}

pub async fn list_for_entity<C: ConnectionTrait>(
    conn: &C,
    entity_id: i32,
) -> LibraryResult<Vec<dependency::Model>> {
    Ok(DependencyEntity::find()
        .filter(dependency::Column::EntityId.eq(entity_id))
        .all(conn)
        .await?)
}
