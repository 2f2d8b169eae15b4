//! `SeaORM` entity for the `swaps` table: an atomic transition from one
//! entity's active deployments to another's.

use library_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::{Environment, SwapStatus, SwapType};
use crate::validation::ValidationResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "swaps")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[schema(read_only)]
    pub id: i32,
    pub from_entity_id: i32,
    pub to_entity_id: i32,
    pub from_deployment_id: Option<i32>,
    pub to_deployment_id: Option<i32>,
    pub swap_type: SwapType,
    pub status: SwapStatus,
    pub reason: Option<String>,
    pub initiated_by: String,
    pub initiated_at: UtcDateTime,
    pub completed_at: Option<UtcDateTime>,
    pub duration_seconds: Option<f64>,
    pub downtime_milliseconds: Option<i64>,
    pub success: Option<bool>,
    pub error_message: Option<String>,
    pub validation_results: Option<ValidationResult>,
    pub rolled_back_at: Option<UtcDateTime>,
    pub rolled_back_by: Option<String>,
    pub rollback_reason: Option<String>,
    pub target_environment: Option<Environment>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entity::Entity",
        from = "Column::FromEntityId",
        to = "super::entity::Column::Id"
    )]
    FromEntity,
}

impl Related<super::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FromEntity.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(self)
    }
}

impl Model {
    pub fn can_rollback(&self) -> bool {
        self.status == SwapStatus::Completed && self.rolled_back_at.is_none()
    }
}
