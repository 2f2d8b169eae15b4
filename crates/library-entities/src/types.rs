use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use utoipa::ToSchema;

/// Entity type classification. Determines which swap partners are compatible
/// (a swap requires `from.type == to.type`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[sea_orm(string_value = "strategy")]
    Strategy,
    #[sea_orm(string_value = "pipeline")]
    Pipeline,
    #[sea_orm(string_value = "model")]
    Model,
    #[sea_orm(string_value = "feature_set")]
    FeatureSet,
    #[sea_orm(string_value = "transformer")]
    Transformer,
    #[sea_orm(string_value = "validator")]
    Validator,
    #[sea_orm(string_value = "optimizer")]
    Optimizer,
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Strategy => "strategy",
            EntityType::Pipeline => "pipeline",
            EntityType::Model => "model",
            EntityType::FeatureSet => "feature_set",
            EntityType::Transformer => "transformer",
            EntityType::Validator => "validator",
            EntityType::Optimizer => "optimizer",
        }
    }
}

/// Entity lifecycle status. Transitions are constrained by the state machine
/// in the entity API component: `registered -> validated -> deployed -> active <-> inactive`,
/// with side branches to `failed` and `deprecated`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    #[sea_orm(string_value = "registered")]
    Registered,
    #[sea_orm(string_value = "validated")]
    Validated,
    #[sea_orm(string_value = "deployed")]
    Deployed,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "deprecated")]
    Deprecated,
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Registered => "registered",
            EntityStatus::Validated => "validated",
            EntityStatus::Deployed => "deployed",
            EntityStatus::Active => "active",
            EntityStatus::Inactive => "inactive",
            EntityStatus::Deprecated => "deprecated",
            EntityStatus::Failed => "failed",
        }
    }

    /// Whether `self -> next` is a permitted transition on the entity state machine.
    /// `deleted_at` is handled separately by soft-delete and is legal from any status.
    pub fn can_transition_to(&self, next: EntityStatus) -> bool {
        use EntityStatus::*;
        matches!(
            (self, next),
            (Registered, Validated)
                | (Registered, Failed)
                | (Validated, Deployed)
                | (Validated, Failed)
                | (Deployed, Active)
                | (Deployed, Deprecated)
                | (Deployed, Failed)
                | (Active, Inactive)
                | (Inactive, Active)
                | (Active, Deprecated)
                | (Inactive, Deprecated)
        )
    }
}

/// Health status reported by monitoring external to this service and recorded
/// against an entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[sea_orm(string_value = "healthy")]
    Healthy,
    #[sea_orm(string_value = "degraded")]
    Degraded,
    #[sea_orm(string_value = "unhealthy")]
    Unhealthy,
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Unknown => "unknown",
        }
    }
}

/// Named deployment target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[sea_orm(string_value = "development")]
    Development,
    #[sea_orm(string_value = "staging")]
    Staging,
    #[sea_orm(string_value = "production")]
    Production,
    #[sea_orm(string_value = "testing")]
    Testing,
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Testing => "testing",
        }
    }
}

/// Deployment row status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "deploying")]
    Deploying,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "rolled_back")]
    RolledBack,
}

impl Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Pending => "pending",
            DeploymentStatus::Deploying => "deploying",
            DeploymentStatus::Active => "active",
            DeploymentStatus::Inactive => "inactive",
            DeploymentStatus::Failed => "failed",
            DeploymentStatus::RolledBack => "rolled_back",
        }
    }
}

/// How a swap was initiated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SwapType {
    #[sea_orm(string_value = "manual")]
    Manual,
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "automatic")]
    Automatic,
    #[sea_orm(string_value = "emergency")]
    Emergency,
    #[sea_orm(string_value = "rollback")]
    Rollback,
}

impl Default for SwapType {
    fn default() -> Self {
        SwapType::Manual
    }
}

impl Display for SwapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SwapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapType::Manual => "manual",
            SwapType::Scheduled => "scheduled",
            SwapType::Automatic => "automatic",
            SwapType::Emergency => "emergency",
            SwapType::Rollback => "rollback",
        }
    }
}

/// Swap row status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    #[sea_orm(string_value = "initiated")]
    Initiated,
    #[sea_orm(string_value = "validating")]
    Validating,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "rolled_back")]
    RolledBack,
}

impl Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Initiated => "initiated",
            SwapStatus::Validating => "validating",
            SwapStatus::InProgress => "in_progress",
            SwapStatus::Completed => "completed",
            SwapStatus::Failed => "failed",
            SwapStatus::RolledBack => "rolled_back",
        }
    }
}

/// Severity of an audit-log event row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    #[sea_orm(string_value = "debug")]
    Debug,
    #[sea_orm(string_value = "info")]
    Info,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "error")]
    Error,
    #[sea_orm(string_value = "critical")]
    Critical,
}

impl Display for EventSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSeverity::Debug => "debug",
            EventSeverity::Info => "info",
            EventSeverity::Warning => "warning",
            EventSeverity::Error => "error",
            EventSeverity::Critical => "critical",
        }
    }
}

/// Directed relationship kind between two entities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    #[sea_orm(string_value = "required")]
    Required,
    #[sea_orm(string_value = "optional")]
    Optional,
    #[sea_orm(string_value = "recommended")]
    Recommended,
    #[sea_orm(string_value = "conflicts_with")]
    ConflictsWith,
}

impl Display for DependencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::Required => "required",
            DependencyType::Optional => "optional",
            DependencyType::Recommended => "recommended",
            DependencyType::ConflictsWith => "conflicts_with",
        }
    }
}

/// Status of a declared dependency edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "broken")]
    Broken,
}

impl Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DependencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyStatus::Active => "active",
            DependencyStatus::Inactive => "inactive",
            DependencyStatus::Broken => "broken",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_status_transitions() {
        assert!(EntityStatus::Registered.can_transition_to(EntityStatus::Validated));
        assert!(EntityStatus::Validated.can_transition_to(EntityStatus::Deployed));
        assert!(EntityStatus::Deployed.can_transition_to(EntityStatus::Active));
        assert!(EntityStatus::Active.can_transition_to(EntityStatus::Inactive));
        assert!(EntityStatus::Inactive.can_transition_to(EntityStatus::Active));
        assert!(!EntityStatus::Registered.can_transition_to(EntityStatus::Active));
        assert!(!EntityStatus::Active.can_transition_to(EntityStatus::Registered));
    }

    #[test]
    fn round_trip_as_str() {
        assert_eq!(EntityType::Strategy.as_str(), "strategy");
        assert_eq!(DeploymentStatus::RolledBack.as_str(), "rolled_back");
        assert_eq!(SwapStatus::InProgress.as_str(), "in_progress");
    }
}
