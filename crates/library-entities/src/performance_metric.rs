//! `SeaORM` entity for the `performance_metrics` table: a point-in-time
//! numeric sample recorded against an entity, optionally scoped to a
//! specific deployment. Read-only from the API's perspective: the service
//! persists what it is given, it does not compute risk or trading metrics.

use library_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "performance_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[schema(read_only)]
    pub id: i64,
    pub entity_id: i32,
    pub deployment_id: Option<i32>,
    pub metric_name: String,
    pub metric_value: f64,
    pub unit: Option<String>,
    pub recorded_at: UtcDateTime,
    pub metadata: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entity::Entity",
        from = "Column::EntityId",
        to = "super::entity::Column::Id"
    )]
    Entity,
    #[sea_orm(
        belongs_to = "super::deployment::Entity",
        from = "Column::DeploymentId",
        to = "super::deployment::Column::Id"
    )]
    Deployment,
}

impl Related<super::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entity.def()
    }
}

impl Related<super::deployment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deployment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
