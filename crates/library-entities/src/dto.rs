//! Request/response DTOs for the REST surface (§6). Kept apart from the
//! `SeaORM` models because the API boundary accepts partial/opaque payloads
//! that don't map 1:1 onto a row (e.g. a partial entity update, or a
//! `validate_only` swap that produces no row at all).

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use utoipa::{IntoParams, ToSchema};

use crate::entity::{ResourceHints, Tags};
use crate::types::{
    DependencyType, DeploymentStatus, EntityStatus, EntityType, Environment, EventSeverity,
    HealthStatus, SwapStatus, SwapType,
};
use crate::validation::ValidationResult;

fn is_object_or_null(value: &Json) -> bool {
    matches!(value, Json::Object(_) | Json::Null)
}

/// Validates that an opaque payload field is a JSON object (or absent),
/// never an array or scalar — the one shape constraint the API places on
/// otherwise-opaque `config`/`parameters` maps (see design note on dynamic
/// JSON payloads).
pub fn validate_opaque_object(value: &Option<Json>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if !is_object_or_null(v) => {
            Err(format!("`{field}` must be a JSON object"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEntityRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub category: Option<String>,
    pub description: Option<String>,
    pub version: String,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub config: Option<Json>,
    pub parameters: Option<Json>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub resource_hints: Option<ResourceHints>,
    pub created_by: Option<String>,
}

/// Partial update: every field is optional and only supplied fields are mutated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEntityRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub config: Option<Json>,
    pub parameters: Option<Json>,
    pub requirements: Option<Vec<String>>,
    pub status: Option<EntityStatus>,
    pub health_status: Option<HealthStatus>,
    pub resource_hints: Option<ResourceHints>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EntityListQuery {
    pub r#type: Option<EntityType>,
    pub category: Option<String>,
    pub status: Option<EntityStatus>,
    pub health_status: Option<HealthStatus>,
    pub search: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl Tags {
    pub fn from_vec(v: Vec<String>) -> Self {
        Tags(v)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DependencyView {
    pub dependency_id: i32,
    pub entity: crate::entity::Model,
    pub dependency_type: DependencyType,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDependencyRequest {
    pub depends_on_entity_id: i32,
    pub dependency_type: DependencyType,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDeploymentRequest {
    pub entity_id: i32,
    pub environment: Environment,
    pub deployed_by: String,
    pub config_override: Option<Json>,
    pub parameters_override: Option<Json>,
    pub deployment_method: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RollbackDeploymentRequest {
    pub reason: String,
    pub rolled_back_by: String,
    pub target_deployment_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DeploymentListQuery {
    pub entity_id: Option<i32>,
    pub environment: Option<Environment>,
    pub status: Option<DeploymentStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SwapRequest {
    pub from_entity_id: i32,
    pub to_entity_id: i32,
    pub reason: Option<String>,
    pub initiated_by: String,
    #[serde(default)]
    pub swap_type: Option<SwapType>,
    #[serde(default)]
    pub validate_only: bool,
    pub target_environment: Option<Environment>,
}

/// Response of the swap-execution endpoint. `swap` is `None` only for a
/// `validate_only` dry run, which never persists a row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SwapResponse {
    pub swap: Option<crate::swap::Model>,
    pub status: SwapStatus,
    pub validation_results: ValidationResult,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SwapRollbackRequest {
    pub reason: String,
    pub rolled_back_by: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SwapListQuery {
    pub entity_id: Option<i32>,
    pub status: Option<SwapStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EventListQuery {
    pub entity_id: Option<i32>,
    pub deployment_id: Option<i32>,
    pub swap_id: Option<i32>,
    pub severity: Option<EventSeverity>,
    pub event_type: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PerformanceMetricListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub store: ComponentHealth,
    pub bus: ComponentHealth,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub connected: bool,
    pub detail: Option<String>,
}
