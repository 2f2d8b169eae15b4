//! Post-deployment checks (§4.4b), run inside the Deployment Manager's
//! transaction after the new deployment row is inserted. Results are stored
//! on the row but, in the nominal path, do not block the commit.

use library_entities::deployment;
use library_entities::types::DeploymentStatus;
use library_entities::validation::ValidationResult;

pub fn post_deployment_check(deployment: &deployment::Model) -> ValidationResult {
    let mut builder = ValidationResult::builder().check("deployment_exists", true);

    let has_config_snapshot = deployment.config_snapshot.is_object()
        && !deployment
            .config_snapshot
            .as_object()
            .map(|m| m.is_empty())
            .unwrap_or(true);
    builder = builder.check("config_snapshot_present", has_config_snapshot);
    if !has_config_snapshot {
        builder = builder.warning("config_snapshot is empty");
    }

    let status_ok = matches!(deployment.status, DeploymentStatus::Active | DeploymentStatus::Deploying);
    builder = builder.check("status_acceptable", status_ok);
    if !status_ok {
        builder = builder.error(format!(
            "deployment status '{}' is not active or deploying",
            deployment.status
        ));
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use library_entities::types::Environment;
    use serde_json::json;

    fn deployment_with(status: DeploymentStatus, config: serde_json::Value) -> deployment::Model {
        deployment::Model {
            id: 1,
            entity_id: 1,
            version_snapshot: "1.0.0".to_string(),
            environment: Environment::Staging,
            config_snapshot: config,
            parameters_snapshot: json!({}),
            status,
            deployed_at: Some(Utc::now()),
            deployed_by: Some("u1".to_string()),
            deployment_method: "manual".to_string(),
            rolled_back_at: None,
            rolled_back_by: None,
            rollback_reason: None,
            previous_deployment_id: None,
            validation_results: None,
            error_logs: None,
            duration_seconds: None,
            health_checks: None,
            last_health_check: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn passes_with_config_snapshot() {
        let dep = deployment_with(DeploymentStatus::Active, json!({"risk": "low"}));
        let result = post_deployment_check(&dep);
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn warns_on_empty_config_snapshot() {
        let dep = deployment_with(DeploymentStatus::Active, json!({}));
        let result = post_deployment_check(&dep);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn fails_on_bad_status() {
        let dep = deployment_with(DeploymentStatus::Failed, json!({"risk": "low"}));
        let result = post_deployment_check(&dep);
        assert!(!result.passed);
    }
}
