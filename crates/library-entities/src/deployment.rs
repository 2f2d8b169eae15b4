//! `SeaORM` entity for the `deployments` table: a binding of an entity to an environment.

use library_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::{DeploymentStatus, Environment};
use crate::validation::ValidationResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "deployments")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[schema(read_only)]
    pub id: i32,
    pub entity_id: i32,
    pub version_snapshot: String,
    pub environment: Environment,
    pub config_snapshot: Json,
    pub parameters_snapshot: Json,
    pub status: DeploymentStatus,
    pub deployed_at: Option<UtcDateTime>,
    pub deployed_by: Option<String>,
    pub deployment_method: String,
    pub rolled_back_at: Option<UtcDateTime>,
    pub rolled_back_by: Option<String>,
    pub rollback_reason: Option<String>,
    pub previous_deployment_id: Option<i32>,
    pub validation_results: Option<ValidationResult>,
    pub error_logs: Option<String>,
    pub duration_seconds: Option<f64>,
    pub health_checks: Option<Json>,
    pub last_health_check: Option<UtcDateTime>,
    #[schema(read_only)]
    pub created_at: UtcDateTime,
    #[schema(read_only)]
    pub updated_at: UtcDateTime,
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

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            if self.created_at.is_not_set() {
                self.created_at = Set(now);
            }
            if self.updated_at.is_not_set() {
                self.updated_at = Set(now);
            }
        } else {
            self.updated_at = Set(now);
        }
        Ok(self)
    }
}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == DeploymentStatus::Active
    }
}
