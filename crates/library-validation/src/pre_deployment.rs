//! Pre-deployment checks (§4.4a), run before the Deployment Manager opens its
//! transaction. A failing check aborts the deploy; a warning does not.

use library_entities::entity;
use library_entities::types::{EntityStatus, HealthStatus};
use library_entities::validation::ValidationResult;

/// `existing_active` is every currently-active deployment of `entity` in the
/// target environment, as seen before the transaction starts.
pub fn pre_deployment_check(
    entity: &entity::Model,
    existing_active: &[library_entities::deployment::Model],
) -> ValidationResult {
    let eligible_status = matches!(
        entity.status,
        EntityStatus::Registered | EntityStatus::Validated | EntityStatus::Deployed | EntityStatus::Active
    );

    let mut builder = ValidationResult::builder().check("eligible_status", eligible_status);
    if !eligible_status {
        builder = builder.error(format!(
            "entity status '{}' is not eligible for deployment",
            entity.status
        ));
    }

    let has_active = !existing_active.is_empty();
    builder = builder.check("no_pre_existing_active_deployment", !has_active);
    if has_active {
        builder = builder.warning("an active deployment already exists in this environment");
    }

    let healthy_enough = entity.health_status != HealthStatus::Unhealthy;
    builder = builder.check("health_acceptable", healthy_enough);
    if !healthy_enough {
        builder = builder.error("entity health status is unhealthy");
    }

    let version_present = !entity.version.trim().is_empty();
    builder = builder.check("version_present", version_present);
    if !version_present {
        builder = builder.error("entity version is empty");
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use library_entities::types::EntityType;
    use serde_json::json;

    fn entity_with(status: EntityStatus, health: HealthStatus, version: &str) -> entity::Model {
        entity::Model {
            id: 1,
            name: "alpha".to_string(),
            entity_type: EntityType::Strategy,
            category: None,
            description: None,
            version: version.to_string(),
            author: None,
            tags: Default::default(),
            config: json!({}),
            parameters: json!({}),
            requirements: json!([]),
            status,
            health_status: health,
            deployed_at: None,
            deployed_by: None,
            deployment_config: None,
            resource_hints: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
        }
    }

    #[test]
    fn passes_with_no_prior_active_deployment() {
        let entity = entity_with(EntityStatus::Registered, HealthStatus::Healthy, "1.0.0");
        let result = pre_deployment_check(&entity, &[]);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn ineligible_status_fails() {
        let entity = entity_with(EntityStatus::Deprecated, HealthStatus::Healthy, "1.0.0");
        let result = pre_deployment_check(&entity, &[]);
        assert!(!result.passed);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn unhealthy_entity_fails() {
        let entity = entity_with(EntityStatus::Registered, HealthStatus::Unhealthy, "1.0.0");
        let result = pre_deployment_check(&entity, &[]);
        assert!(!result.passed);
    }

    #[test]
    fn empty_version_fails() {
        let entity = entity_with(EntityStatus::Registered, HealthStatus::Healthy, "");
        let result = pre_deployment_check(&entity, &[]);
        assert!(!result.passed);
    }
}
