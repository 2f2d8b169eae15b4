//! Swap compatibility checks (§4.4c), run before the Swap Engine inserts a
//! `Swap` row. Unlike the deployment checks, a failure here means no row is
//! ever persisted (see the Swap Engine's `validate_only` dry-run path).

use library_entities::entity;
use library_entities::types::HealthStatus;
use library_entities::validation::ValidationResult;
use std::collections::BTreeSet;

/// `from_active_deployment_count` is the number of currently-active
/// deployments of `from`, used by the "from has at least one active
/// deployment" check without the validation engine depending on the store.
pub fn swap_compatibility_check(
    from: &entity::Model,
    to: &entity::Model,
    from_active_deployment_count: usize,
) -> ValidationResult {
    let mut builder = ValidationResult::builder().as_swap();

    let neither_deleted = !from.is_deleted() && !to.is_deleted();
    builder = builder.check("neither_deleted", neither_deleted);
    if !neither_deleted {
        builder = builder.error("one or both entities are soft-deleted");
    }

    let same_type = from.entity_type == to.entity_type;
    builder = builder.check("type_match", same_type);
    if !same_type {
        builder = builder.error(format!(
            "type mismatch: from is '{}', to is '{}'",
            from.entity_type, to.entity_type
        ));
    }

    let from_status_ok = matches!(
        from.status,
        library_entities::types::EntityStatus::Deployed | library_entities::types::EntityStatus::Active
    );
    builder = builder.check("from_status_eligible", from_status_ok);
    if !from_status_ok {
        builder = builder.error(format!(
            "from entity status '{}' is not deployed or active",
            from.status
        ));
    }

    let to_status_ok = matches!(
        to.status,
        library_entities::types::EntityStatus::Deployed
            | library_entities::types::EntityStatus::Active
            | library_entities::types::EntityStatus::Validated
            | library_entities::types::EntityStatus::Registered
    );
    builder = builder.check("to_status_eligible", to_status_ok);
    if !to_status_ok {
        builder = builder.error(format!(
            "to entity status '{}' is not eligible to receive traffic",
            to.status
        ));
    }

    let to_healthy = to.health_status != HealthStatus::Unhealthy;
    builder = builder.check("to_health_acceptable", to_healthy);
    if !to_healthy {
        builder = builder.error("to entity health status is unhealthy");
    }

    if from.health_status == HealthStatus::Unhealthy {
        builder = builder.warning("from entity health status is unhealthy");
    }

    let from_has_active = from_active_deployment_count > 0;
    builder = builder.check("from_has_active_deployment", from_has_active);
    if !from_has_active {
        builder = builder.error("from entity has no active deployment to swap out of");
    }

    let from_keys = config_keys(from);
    let to_keys = config_keys(to);
    let missing: Vec<&str> = from_keys.difference(&to_keys).copied().collect();
    let keys_compatible = missing.is_empty();
    builder = builder.check("config_keys_compatible", keys_compatible);
    if !keys_compatible {
        builder = builder.warning(format!(
            "to entity config is missing keys present on from: {}",
            missing.join(", ")
        ));
    }

    // A swap's downtime is dominated by the number of environments it has to
    // touch; with no live deployment count available at this stage the check
    // estimates conservatively from the from-entity's active deployment count.
    builder = builder.estimated_downtime_ms((from_active_deployment_count as i64).max(1) * 50);

    builder.build()
}

fn config_keys(entity: &entity::Model) -> BTreeSet<&str> {
    entity
        .config
        .as_object()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use library_entities::types::{EntityStatus, EntityType};
    use serde_json::json;

    fn entity_with(
        entity_type: EntityType,
        status: EntityStatus,
        health: HealthStatus,
        config: serde_json::Value,
    ) -> entity::Model {
        entity::Model {
            id: 1,
            name: "e".to_string(),
            entity_type,
            category: None,
            description: None,
            version: "1.0.0".to_string(),
            author: None,
            tags: Default::default(),
            config,
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
    fn compatible_happy_path() {
        let from = entity_with(
            EntityType::Strategy,
            EntityStatus::Active,
            HealthStatus::Healthy,
            json!({"risk": "low"}),
        );
        let to = entity_with(
            EntityType::Strategy,
            EntityStatus::Deployed,
            HealthStatus::Healthy,
            json!({"risk": "low", "extra": "ok"}),
        );
        let result = swap_compatibility_check(&from, &to, 1);
        assert!(result.passed);
        assert_eq!(result.compatible, Some(true));
    }

    #[test]
    fn type_mismatch_fails() {
        let from = entity_with(
            EntityType::Strategy,
            EntityStatus::Active,
            HealthStatus::Healthy,
            json!({}),
        );
        let to = entity_with(
            EntityType::Pipeline,
            EntityStatus::Deployed,
            HealthStatus::Healthy,
            json!({}),
        );
        let result = swap_compatibility_check(&from, &to, 1);
        assert!(!result.passed);
        assert_eq!(result.compatible, Some(false));
    }

    #[test]
    fn missing_config_keys_warns_not_fails() {
        let from = entity_with(
            EntityType::Strategy,
            EntityStatus::Active,
            HealthStatus::Healthy,
            json!({"risk": "low"}),
        );
        let to = entity_with(
            EntityType::Strategy,
            EntityStatus::Deployed,
            HealthStatus::Healthy,
            json!({}),
        );
        let result = swap_compatibility_check(&from, &to, 1);
        assert!(result.passed);
        assert_eq!(result.compatible, Some(false));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn no_active_deployment_fails() {
        let from = entity_with(
            EntityType::Strategy,
            EntityStatus::Active,
            HealthStatus::Healthy,
            json!({}),
        );
        let to = entity_with(
            EntityType::Strategy,
            EntityStatus::Deployed,
            HealthStatus::Healthy,
            json!({}),
        );
        let result = swap_compatibility_check(&from, &to, 0);
        assert!(!result.passed);
    }
}
