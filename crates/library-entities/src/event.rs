//! `SeaORM` entity for the `events` table: the append-only audit log written
//! by the Event Publisher's post-commit hook (see `library-events`).

use library_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::EventSeverity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[schema(read_only)]
    pub id: i64,
    pub event_type: String,
    pub event_category: String,
    pub severity: EventSeverity,
    pub entity_id: Option<i32>,
    pub deployment_id: Option<i32>,
    pub swap_id: Option<i32>,
    pub message: String,
    pub details: Json,
    pub user_id: Option<String>,
    pub source: String,
    pub occurred_at: UtcDateTime,
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
