//! `SeaORM` entity for the `dependencies` table: a directed edge between two entities.

use library_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::{DependencyStatus, DependencyType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "dependencies")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[schema(read_only)]
    pub id: i32,
    pub entity_id: i32,
    pub depends_on_entity_id: i32,
    pub dependency_type: DependencyType,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
    pub status: DependencyStatus,
    #[schema(read_only)]
    pub created_at: UtcDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entity::Entity",
        from = "Column::EntityId",
        to = "super::entity::Column::Id"
    )]
    Entity,
}

impl Related<super::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
