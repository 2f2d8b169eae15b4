//! Deployment Manager (§4.2): pre-deployment validation, a transactional
//! commit that retires any prior active deployment in the target
//! environment, post-deployment validation persisted on the new row, and
//! rollback to a prior deployment.

use std::time::Instant;

use chrono::Utc;
use library_core::{LibraryError, LibraryResult};
use library_entities::deployment;
use library_entities::dto::{CreateDeploymentRequest, DeploymentListQuery, Page};
use library_entities::entity;
use library_entities::types::{DeploymentStatus, EntityStatus, EventSeverity};
use library_events::subjects;
use library_events::BusTransport;
use library_store::store;
use library_validation::{post_deployment_check, pre_deployment_check};
use sea_orm::ActiveValue::Set;
use sea_orm::TransactionTrait;
use serde_json::json;

use crate::{txn_err, RegistryService};

impl<T: BusTransport> RegistryService<T> {
    pub async fn create_deployment(&self, req: CreateDeploymentRequest) -> LibraryResult<deployment::Model> {
        let entity_id = req.entity_id;
        let environment = req.environment;

        let entity = store::entities::get(&*self.db, entity_id).await?;
        let existing_active =
            store::deployments::list_active_for_env(&*self.db, entity_id, environment).await?;

        let validation = pre_deployment_check(&entity, &existing_active);
        if !validation.passed {
            return Err(LibraryError::ValidationFailed {
                errors: validation.errors,
                warnings: validation.warnings,
                checks: validation.checks.into_iter().collect(),
            });
        }

        let started_at = Instant::now();
        let config_override = req.config_override;
        let parameters_override = req.parameters_override;
        let deployment_method = req.deployment_method.unwrap_or_else(|| "standard".to_string());
        let deployed_by = req.deployed_by;

        let outcome = self
            .db
            .transaction::<_, deployment::Model, LibraryError>(|txn| {
                Box::pin(async move {
                    let locked = store::entities::lock_for_update(txn, entity_id).await?;

                    let active = store::deployments::list_active_for_env(txn, entity_id, environment).await?;
                    for dep in active {
                        store::deployments::set_status(txn, dep.id, DeploymentStatus::Inactive).await?;
                    }

                    let config_snapshot = config_override.unwrap_or_else(|| locked.config.clone());
                    let parameters_snapshot =
                        parameters_override.unwrap_or_else(|| locked.parameters.clone());
                    let now = Utc::now();

                    let am = deployment::ActiveModel {
                        entity_id: Set(entity_id),
                        version_snapshot: Set(locked.version.clone()),
                        environment: Set(environment),
                        config_snapshot: Set(config_snapshot),
                        parameters_snapshot: Set(parameters_snapshot),
                        status: Set(DeploymentStatus::Active),
                        deployed_at: Set(Some(now)),
                        deployed_by: Set(Some(deployed_by.clone())),
                        deployment_method: Set(deployment_method),
                        ..Default::default()
                    };
                    let inserted = store::deployments::insert(txn, am).await?;

                    let post_validation = post_deployment_check(&inserted);
                    let duration = started_at.elapsed().as_secs_f64();
                    let mut am: deployment::ActiveModel = inserted.into();
                    am.validation_results = Set(Some(post_validation));
                    am.duration_seconds = Set(Some(duration));
                    let saved = store::deployments::save(txn, am).await?;

                    let mut entity_am: entity::ActiveModel = locked.into();
                    entity_am.status = Set(EntityStatus::Deployed);
                    entity_am.deployed_at = Set(Some(now));
                    entity_am.deployed_by = Set(Some(deployed_by));
                    entity_am.deployment_config = Set(Some(saved.config_snapshot.clone()));
                    store::entities::save(txn, entity_am).await?;

                    Ok(saved)
                })
            })
            .await;

        match outcome {
            Ok(deployed) => {
                if let Err(err) = self
                    .publisher
                    .publish_and_record(
                        &*self.db,
                        subjects::DEPLOYMENT_COMPLETED,
                        "deployment.completed",
                        "deployment",
                        EventSeverity::Info,
                        Some(entity_id),
                        Some(deployed.id),
                        None,
                        &format!("entity {entity_id} deployed to {environment}"),
                        json!({"environment": environment.as_str(), "deployment_id": deployed.id}),
                    )
                    .await
                {
                    tracing::error!(%err, entity_id, "failed to persist deployment.completed event");
                }
                Ok(deployed)
            }
            Err(err) => {
                let library_err = txn_err(err);
                if let Err(publish_err) = self
                    .publisher
                    .publish_and_record(
                        &*self.db,
                        subjects::DEPLOYMENT_FAILED,
                        "deployment.failed",
                        "deployment",
                        EventSeverity::Error,
                        Some(entity_id),
                        None,
                        None,
                        &format!("deployment of entity {entity_id} to {environment} failed: {library_err}"),
                        json!({"environment": environment.as_str(), "error": library_err.to_string()}),
                    )
                    .await
                {
                    tracing::error!(%publish_err, entity_id, "failed to persist deployment.failed event");
                }
                Err(library_err)
            }
        }
    }

    pub async fn rollback_deployment(
        &self,
        deployment_id: i32,
        reason: String,
        rolled_back_by: String,
        target_deployment_id: Option<i32>,
    ) -> LibraryResult<deployment::Model> {
        let current = store::deployments::get(&*self.db, deployment_id).await?;
        let entity_id = current.entity_id;
        let environment = current.environment;
        let current_id = current.id;

        let target = match target_deployment_id {
            Some(id) => {
                let candidate = store::deployments::get(&*self.db, id).await?;
                if candidate.entity_id != entity_id {
                    return Err(LibraryError::NoRollbackTarget(format!(
                        "deployment {id} does not belong to entity {entity_id}"
                    )));
                }
                Some(candidate)
            }
            None => {
                let before = current.deployed_at.unwrap_or(current.created_at);
                store::deployments::find_previous_active(&*self.db, entity_id, environment, before, current.id)
                    .await?
            }
        };

        let target = target.ok_or_else(|| {
            LibraryError::NoRollbackTarget(format!(
                "no prior deployment available for entity {entity_id} in {environment}"
            ))
        })?;
        let target_id = target.id;

        let actor = rolled_back_by;
        let reason_for_record = reason;

        let outcome = self
            .db
            .transaction::<_, deployment::Model, LibraryError>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();

                    let mut current_am: deployment::ActiveModel = current.into();
                    current_am.status = Set(DeploymentStatus::RolledBack);
                    current_am.rolled_back_at = Set(Some(now));
                    current_am.rolled_back_by = Set(Some(actor.clone()));
                    current_am.rollback_reason = Set(Some(reason_for_record));
                    current_am.previous_deployment_id = Set(Some(target_id));
                    store::deployments::save(txn, current_am).await?;

                    let mut target_am: deployment::ActiveModel = target.into();
                    target_am.status = Set(DeploymentStatus::Active);
                    let reactivated = store::deployments::save(txn, target_am).await?;

                    let entity = store::entities::lock_for_update(txn, entity_id).await?;
                    let mut entity_am: entity::ActiveModel = entity.into();
                    entity_am.status = Set(EntityStatus::Active);
                    entity_am.deployed_at = Set(reactivated.deployed_at);
                    entity_am.deployed_by = Set(reactivated.deployed_by.clone());
                    entity_am.deployment_config = Set(Some(reactivated.config_snapshot.clone()));
                    store::entities::save(txn, entity_am).await?;

                    Ok(reactivated)
                })
            })
            .await
            .map_err(txn_err)?;

        if let Err(err) = self
            .publisher
            .publish_and_record(
                &*self.db,
                subjects::DEPLOYMENT_ROLLED_BACK,
                "deployment.rolled_back",
                "deployment",
                EventSeverity::Warning,
                Some(entity_id),
                Some(outcome.id),
                None,
                &format!("deployment {current_id} rolled back to {target_id} for entity {entity_id}"),
                json!({"from_deployment_id": current_id, "to_deployment_id": target_id}),
            )
            .await
        {
            tracing::error!(%err, entity_id, "failed to persist deployment.rolled_back event");
        }

        Ok(outcome)
    }

    pub async fn get_deployment(&self, id: i32) -> LibraryResult<deployment::Model> {
        store::deployments::get(&*self.db, id).await
    }

    pub async fn list_deployments(
        &self,
        filter: DeploymentListQuery,
        page: u64,
        page_size: u64,
    ) -> LibraryResult<Page<deployment::Model>> {
        store::deployments::list(&*self.db, filter, page, page_size).await
    }
}
