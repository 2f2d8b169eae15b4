//! `SeaORM` entity for the `entities` table: the versioned artifact row.

use library_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr, FromJsonQueryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::types::{EntityStatus, EntityType, HealthStatus};

/// Resource hints carried on an entity, consulted by deployment targeting
/// but never enforced by this service (scheduling is out of scope).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct ResourceHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<String>,
}

/// Ordered set of string tags, stored as a JSON array column (the store has no
/// native array/GIN type in the sqlite test backend, so overlap filtering is
/// done in application code rather than relying on a DB-level set type).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct Tags(pub Vec<String>);

impl Tags {
    pub fn as_set(&self) -> BTreeSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    pub fn overlaps(&self, other: &BTreeSet<&str>) -> bool {
        self.0.iter().any(|t| other.contains(t.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "entities")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[schema(read_only)]
    pub id: i32,
    pub name: String,
    pub entity_type: EntityType,
    pub category: Option<String>,
    pub description: Option<String>,
    pub version: String,
    pub author: Option<String>,
    pub tags: Tags,
    pub config: Json,
    pub parameters: Json,
    pub requirements: Json,
    pub status: EntityStatus,
    pub health_status: HealthStatus,
    pub deployed_at: Option<UtcDateTime>,
    pub deployed_by: Option<String>,
    pub deployment_config: Option<Json>,
    pub resource_hints: ResourceHints,
    #[schema(read_only)]
    pub created_at: UtcDateTime,
    #[schema(read_only)]
    pub updated_at: UtcDateTime,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    #[schema(read_only)]
    pub deleted_at: Option<UtcDateTime>,
    pub deleted_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deployment::Entity")]
    Deployments,
    #[sea_orm(has_many = "super::dependency::Entity")]
    Dependencies,
    #[sea_orm(has_many = "super::performance_metric::Entity")]
    PerformanceMetrics,
}

impl Related<super::deployment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deployments.def()
    }
}

impl Related<super::dependency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dependencies.def()
    }
}

impl Related<super::performance_metric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceMetrics.def()
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
    /// Whether this row is live from the Store Gateway's soft-delete predicate's perspective.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_overlap() {
        let tags = Tags(vec!["a".into(), "b".into()]);
        let query: BTreeSet<&str> = ["b", "c"].into_iter().collect();
        assert!(tags.overlaps(&query));
        let query: BTreeSet<&str> = ["c", "d"].into_iter().collect();
        assert!(!tags.overlaps(&query));
    }
}
