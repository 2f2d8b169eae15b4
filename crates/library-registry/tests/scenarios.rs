//! End-to-end scenarios from the control plane's testable-properties section:
//! deployment rollback, hot swap (happy path, dry run, type mismatch), swap
//! rollback, and degraded-bus behavior — run against an in-memory sqlite
//! store and a `FakeTransport` rather than a live bus.

use std::sync::Arc;

use library_entities::dto::{
    CreateDeploymentRequest, CreateEntityRequest, EventListQuery,
};
use library_entities::types::{Environment, EntityType, SwapType};
use library_events::{EventPublisher, FakeTransport};
use library_registry::RegistryService;
use library_store::test_utils::TestDatabase;

async fn registry_with_fake(
    transport: Arc<FakeTransport>,
) -> (RegistryService<FakeTransport>, TestDatabase) {
    let test_db = TestDatabase::new().await.expect("schema bootstrap");
    let publisher = EventPublisher::new(transport, 1, 30);
    let registry = RegistryService::new(test_db.connection_arc(), publisher);
    (registry, test_db)
}

fn create_req(name: &str, entity_type: EntityType, version: &str) -> CreateEntityRequest {
    CreateEntityRequest {
        name: name.to_string(),
        entity_type,
        category: None,
        description: None,
        version: version.to_string(),
        author: None,
        tags: vec![],
        config: None,
        parameters: None,
        requirements: vec![],
        resource_hints: None,
        created_by: Some("seed".to_string()),
    }
}

/// Scenario A: seed `alpha` v1.0.0, deploy twice to staging (the second with
/// a config override), then roll the second deployment back. D1 should come
/// back active, D2 rolled back, and the entity's snapshot should match D1's.
#[tokio::test]
async fn scenario_a_deployment_rollback() {
    let transport = Arc::new(FakeTransport::new(0));
    let (registry, _db) = registry_with_fake(transport).await;

    let alpha = registry
        .create_entity(create_req("alpha", EntityType::Strategy, "1.0.0"))
        .await
        .expect("create alpha");

    let d1 = registry
        .create_deployment(CreateDeploymentRequest {
            entity_id: alpha.id,
            environment: Environment::Staging,
            deployed_by: "u1".to_string(),
            config_override: None,
            parameters_override: None,
            deployment_method: None,
        })
        .await
        .expect("first deploy");
    assert_eq!(d1.status, library_entities::types::DeploymentStatus::Active);

    let d2 = registry
        .create_deployment(CreateDeploymentRequest {
            entity_id: alpha.id,
            environment: Environment::Staging,
            deployed_by: "u1".to_string(),
            config_override: Some(serde_json::json!({"risk": "low"})),
            parameters_override: None,
            deployment_method: None,
        })
        .await
        .expect("second deploy");
    assert_eq!(d2.status, library_entities::types::DeploymentStatus::Active);

    let d1_after_second_deploy = registry.get_deployment(d1.id).await.unwrap();
    assert_eq!(
        d1_after_second_deploy.status,
        library_entities::types::DeploymentStatus::Inactive
    );

    let rolled = registry
        .rollback_deployment(d2.id, "bug".to_string(), "u1".to_string(), None)
        .await
        .expect("rollback");
    assert_eq!(rolled.id, d1.id);
    assert_eq!(rolled.status, library_entities::types::DeploymentStatus::Active);

    let d2_after = registry.get_deployment(d2.id).await.unwrap();
    assert_eq!(d2_after.status, library_entities::types::DeploymentStatus::RolledBack);
    assert_eq!(d2_after.previous_deployment_id, Some(d1.id));

    let entity_after = registry.get_entity(alpha.id).await.unwrap();
    assert_eq!(entity_after.deployment_config, Some(rolled.config_snapshot.clone()));

    let events = registry
        .list_events(EventListQuery::default(), 1, 100)
        .await
        .unwrap();
    let types: Vec<_> = events.items.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["deployment.rolled_back", "deployment.completed", "deployment.completed"]
    );
}

async fn seed_swap_pair(registry: &RegistryService<FakeTransport>) -> (i32, i32) {
    let alpha = registry
        .create_entity(create_req("strategy_alpha", EntityType::Strategy, "1.0.0"))
        .await
        .unwrap();
    let beta = registry
        .create_entity(create_req("strategy_beta", EntityType::Strategy, "1.0.0"))
        .await
        .unwrap();

    registry
        .create_deployment(CreateDeploymentRequest {
            entity_id: alpha.id,
            environment: Environment::Production,
            deployed_by: "u1".to_string(),
            config_override: None,
            parameters_override: None,
            deployment_method: None,
        })
        .await
        .unwrap();
    registry
        .create_deployment(CreateDeploymentRequest {
            entity_id: beta.id,
            environment: Environment::Staging,
            deployed_by: "u1".to_string(),
            config_override: None,
            parameters_override: None,
            deployment_method: None,
        })
        .await
        .unwrap();

    (alpha.id, beta.id)
}

/// Scenario B: hot swap happy path.
#[tokio::test]
async fn scenario_b_hot_swap_happy_path() {
    let transport = Arc::new(FakeTransport::new(0));
    let (registry, _db) = registry_with_fake(transport).await;
    let (alpha_id, beta_id) = seed_swap_pair(&registry).await;

    let response = registry
        .execute_swap(
            alpha_id,
            beta_id,
            Some("upgrade".to_string()),
            "u1".to_string(),
            SwapType::Manual,
            false,
            None,
        )
        .await
        .expect("swap executes");

    let swap = response.swap.expect("swap row persisted");
    assert_eq!(swap.status, library_entities::types::SwapStatus::Completed);
    assert_eq!(swap.success, Some(true));
    assert!(swap.downtime_milliseconds.unwrap_or(-1) >= 0);

    let alpha = registry.get_entity(alpha_id).await.unwrap();
    let beta = registry.get_entity(beta_id).await.unwrap();
    assert_eq!(alpha.status, library_entities::types::EntityStatus::Inactive);
    assert_eq!(beta.status, library_entities::types::EntityStatus::Active);

    let beta_prod = library_store::store::deployments::list_active_for_env(
        _db.connection(),
        beta_id,
        Environment::Production,
    )
    .await
    .unwrap();
    assert_eq!(beta_prod.len(), 1, "beta should have a new active production deployment");

    let alpha_prod = library_store::store::deployments::list_active_for_env(
        _db.connection(),
        alpha_id,
        Environment::Production,
    )
    .await
    .unwrap();
    assert!(alpha_prod.is_empty(), "alpha's production deployment should be inactive");
}

/// Scenario C: `validate_only` dry run persists nothing and emits no event.
#[tokio::test]
async fn scenario_c_swap_dry_run() {
    let transport = Arc::new(FakeTransport::new(0));
    let (registry, _db) = registry_with_fake(transport.clone()).await;
    let (alpha_id, beta_id) = seed_swap_pair(&registry).await;

    let response = registry
        .execute_swap(
            alpha_id,
            beta_id,
            Some("upgrade".to_string()),
            "u1".to_string(),
            SwapType::Manual,
            true,
            None,
        )
        .await
        .expect("dry run succeeds");

    assert!(response.swap.is_none());
    assert_eq!(response.status, library_entities::types::SwapStatus::Validating);
    assert!(response.validation_results.passed);

    let swaps = library_store::store::swaps::list(
        _db.connection(),
        library_entities::dto::SwapListQuery::default(),
        1,
        100,
    )
    .await
    .unwrap();
    assert_eq!(swaps.total, 0, "dry run must not persist a swap row");
    assert!(transport.published().await.is_empty(), "dry run must not publish an event");
}

/// Scenario D: swaps across mismatched entity types are rejected before any
/// row is written.
#[tokio::test]
async fn scenario_d_type_mismatch_rejected() {
    let transport = Arc::new(FakeTransport::new(0));
    let (registry, db) = registry_with_fake(transport).await;

    let strategy = registry
        .create_entity(create_req("s", EntityType::Strategy, "1.0.0"))
        .await
        .unwrap();
    let pipeline = registry
        .create_entity(create_req("p", EntityType::Pipeline, "1.0.0"))
        .await
        .unwrap();

    let err = registry
        .execute_swap(
            strategy.id,
            pipeline.id,
            None,
            "u1".to_string(),
            SwapType::Manual,
            false,
            None,
        )
        .await
        .expect_err("type mismatch must be rejected");

    match err {
        library_core::LibraryError::ValidationFailed { errors, .. } => {
            assert!(errors.iter().any(|e| e.contains("type mismatch")));
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }

    let swaps = library_store::store::swaps::list(
        db.connection(),
        library_entities::dto::SwapListQuery::default(),
        1,
        100,
    )
    .await
    .unwrap();
    assert_eq!(swaps.total, 0);
}

/// Scenario E: rolling back a completed swap restores the pre-swap state.
#[tokio::test]
async fn scenario_e_swap_rollback() {
    let transport = Arc::new(FakeTransport::new(0));
    let (registry, db) = registry_with_fake(transport).await;
    let (alpha_id, beta_id) = seed_swap_pair(&registry).await;

    let response = registry
        .execute_swap(
            alpha_id,
            beta_id,
            Some("upgrade".to_string()),
            "u1".to_string(),
            SwapType::Manual,
            false,
            None,
        )
        .await
        .unwrap();
    let swap_id = response.swap.unwrap().id;

    let rolled = registry
        .rollback_swap(swap_id, "regression".to_string(), "u1".to_string())
        .await
        .expect("rollback succeeds");
    assert_eq!(rolled.status, library_entities::types::SwapStatus::RolledBack);

    let alpha = registry.get_entity(alpha_id).await.unwrap();
    let beta = registry.get_entity(beta_id).await.unwrap();
    assert_eq!(alpha.status, library_entities::types::EntityStatus::Active);
    assert_eq!(beta.status, library_entities::types::EntityStatus::Inactive);

    let alpha_prod = library_store::store::deployments::list_active_for_env(
        db.connection(),
        alpha_id,
        Environment::Production,
    )
    .await
    .unwrap();
    assert_eq!(alpha_prod.len(), 1, "alpha's production deployment should be reactivated");

    let beta_active = library_store::store::deployments::list_active_for_entity(db.connection(), beta_id)
        .await
        .unwrap();
    assert!(beta_active.is_empty(), "beta should have no active deployment after rollback");
}

/// Scenario F: with the bus down, writes still succeed and the failure is
/// only visible via the publisher's connectivity flag, never the caller.
#[tokio::test]
async fn scenario_f_bus_down_degraded_mode() {
    let transport = FakeTransport::always_down();
    let (registry, db) = registry_with_fake(transport).await;

    let created = registry
        .create_entity(create_req("x", EntityType::Strategy, "1.0.0"))
        .await
        .expect("writes must succeed even with the bus down");

    assert!(!registry.is_bus_connected());

    let fetched = registry.get_entity(created.id).await.unwrap();
    assert_eq!(fetched.name, "x");

    let events = library_store::store::events::list(
        db.connection(),
        EventListQuery::default(),
        1,
        100,
    )
    .await
    .unwrap();
    assert_eq!(events.total, 1, "the attempt is still recorded even though delivery failed");
}
