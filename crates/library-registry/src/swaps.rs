//! Swap Engine (§4.3): atomic hot-swap of active deployments from one entity
//! to another, with a `validate_only` dry run, canonical-order entity row
//! locking to avoid cross-swap deadlock, and deterministic rollback via the
//! affected-deployment set recorded on the swap's validation results.

use std::time::Instant;

use chrono::Utc;
use library_core::{LibraryError, LibraryResult};
use library_entities::deployment;
use library_entities::dto::{Page, SwapListQuery, SwapResponse};
use library_entities::entity;
use library_entities::swap;
use library_entities::types::{DeploymentStatus, EntityStatus, Environment, EventSeverity, SwapStatus, SwapType};
use library_events::subjects;
use library_events::BusTransport;
use library_store::store;
use library_validation::swap_compatibility_check;
use sea_orm::ActiveValue::Set;
use sea_orm::TransactionTrait;
use serde_json::json;

use crate::{txn_err, RegistryService};

impl<T: BusTransport> RegistryService<T> {
    #[allow(clippy::too_many_arguments)]
    pub async fn execute_swap(
        &self,
        from_entity_id: i32,
        to_entity_id: i32,
        reason: Option<String>,
        initiated_by: String,
        swap_type: SwapType,
        validate_only: bool,
        target_environment: Option<Environment>,
    ) -> LibraryResult<SwapResponse> {
        let from = store::entities::get(&*self.db, from_entity_id).await?;
        let to = store::entities::get(&*self.db, to_entity_id).await?;

        let active_count = match target_environment {
            Some(env) => store::deployments::list_active_for_env(&*self.db, from_entity_id, env)
                .await?
                .len(),
            None => store::deployments::list_active_for_entity(&*self.db, from_entity_id)
                .await?
                .len(),
        };

        let validation = swap_compatibility_check(&from, &to, active_count);

        if validate_only {
            return Ok(SwapResponse {
                swap: None,
                status: SwapStatus::Validating,
                validation_results: validation,
            });
        }

        if !validation.passed {
            return Err(LibraryError::ValidationFailed {
                errors: validation.errors,
                warnings: validation.warnings,
                checks: validation.checks.into_iter().collect(),
            });
        }

        let now = Utc::now();
        let swap_am = swap::ActiveModel {
            from_entity_id: Set(from_entity_id),
            to_entity_id: Set(to_entity_id),
            swap_type: Set(swap_type),
            status: Set(SwapStatus::InProgress),
            reason: Set(reason),
            initiated_by: Set(initiated_by.clone()),
            initiated_at: Set(now),
            validation_results: Set(Some(validation)),
            target_environment: Set(target_environment),
            ..Default::default()
        };
        let swap_row = store::swaps::insert(&*self.db, swap_am).await?;
        let swap_id = swap_row.id;
        let base_validation = swap_row.validation_results.clone().unwrap_or_default();

        let started_at = Instant::now();
        let actor = initiated_by;

        let outcome = self
            .db
            .transaction::<_, swap::Model, LibraryError>(|txn| {
                Box::pin(async move {
                    let (first_id, second_id) = if from_entity_id <= to_entity_id {
                        (from_entity_id, to_entity_id)
                    } else {
                        (to_entity_id, from_entity_id)
                    };
                    store::entities::lock_for_update(txn, first_id).await?;
                    if second_id != first_id {
                        store::entities::lock_for_update(txn, second_id).await?;
                    }

                    let from_active = match target_environment {
                        Some(env) => store::deployments::list_active_for_env(txn, from_entity_id, env).await?,
                        None => store::deployments::list_active_for_entity(txn, from_entity_id).await?,
                    };

                    if from_active.is_empty() {
                        let mut am: swap::ActiveModel = swap_row.into();
                        am.status = Set(SwapStatus::Failed);
                        am.success = Set(Some(false));
                        am.error_message = Set(Some(format!(
                            "no active deployment of entity {from_entity_id} found{}",
                            target_environment
                                .map(|e| format!(" in {e}"))
                                .unwrap_or_default()
                        )));
                        am.completed_at = Set(Some(Utc::now()));
                        am.duration_seconds = Set(Some(started_at.elapsed().as_secs_f64()));
                        return Ok(store::swaps::save(txn, am).await?);
                    }

                    let mut affected_ids = Vec::new();
                    let mut first_from_deployment_id = None;
                    let mut first_to_deployment_id = None;

                    for dep in from_active {
                        let environment = dep.environment;
                        store::deployments::set_status(txn, dep.id, DeploymentStatus::Inactive).await?;
                        affected_ids.push(dep.id);
                        if first_from_deployment_id.is_none() {
                            first_from_deployment_id = Some(dep.id);
                        }

                        let existing_to = store::deployments::find_any_for_env(txn, to_entity_id, environment).await?;
                        let to_dep = match existing_to {
                            Some(existing) => {
                                store::deployments::set_status(txn, existing.id, DeploymentStatus::Active).await?
                            }
                            None => {
                                let to_entity = store::entities::get(txn, to_entity_id).await?;
                                let am = deployment::ActiveModel {
                                    entity_id: Set(to_entity_id),
                                    version_snapshot: Set(to_entity.version.clone()),
                                    environment: Set(environment),
                                    config_snapshot: Set(to_entity.config.clone()),
                                    parameters_snapshot: Set(to_entity.parameters.clone()),
                                    status: Set(DeploymentStatus::Active),
                                    deployed_at: Set(Some(Utc::now())),
                                    deployed_by: Set(Some(actor.clone())),
                                    deployment_method: Set("hotswap".to_string()),
                                    ..Default::default()
                                };
                                store::deployments::insert(txn, am).await?
                            }
                        };
                        if first_to_deployment_id.is_none() {
                            first_to_deployment_id = Some(to_dep.id);
                        }
                    }

                    let from_entity = store::entities::get(txn, from_entity_id).await?;
                    let mut from_am: entity::ActiveModel = from_entity.into();
                    from_am.status = Set(EntityStatus::Inactive);
                    store::entities::save(txn, from_am).await?;

                    let to_entity = store::entities::get(txn, to_entity_id).await?;
                    let mut to_am: entity::ActiveModel = to_entity.into();
                    to_am.status = Set(EntityStatus::Active);
                    to_am.deployed_at = Set(Some(Utc::now()));
                    to_am.deployed_by = Set(Some(actor.clone()));
                    store::entities::save(txn, to_am).await?;

                    let downtime_ms = started_at.elapsed().as_millis() as i64;
                    let mut validation = swap_row.validation_results.clone().unwrap_or_default();
                    validation.affected_deployment_ids = affected_ids;

                    let mut am: swap::ActiveModel = swap_row.into();
                    am.status = Set(SwapStatus::Completed);
                    am.success = Set(Some(true));
                    am.completed_at = Set(Some(Utc::now()));
                    am.duration_seconds = Set(Some(started_at.elapsed().as_secs_f64()));
                    am.downtime_milliseconds = Set(Some(downtime_ms));
                    am.from_deployment_id = Set(first_from_deployment_id);
                    am.to_deployment_id = Set(first_to_deployment_id);
                    am.validation_results = Set(Some(validation));
                    Ok(store::swaps::save(txn, am).await?)
                })
            })
            .await
            .map_err(txn_err)?;

        let completed = outcome.status == SwapStatus::Completed;
        let (subject, event_type, severity) = if completed {
            (subjects::SWAP_COMPLETED, "swap.completed", EventSeverity::Info)
        } else {
            (subjects::SWAP_FAILED, "swap.failed", EventSeverity::Error)
        };
        if let Err(err) = self
            .publisher
            .publish_and_record(
                &*self.db,
                subject,
                event_type,
                "swap",
                severity,
                Some(to_entity_id),
                outcome.to_deployment_id,
                Some(swap_id),
                &format!("swap {swap_id} from entity {from_entity_id} to {to_entity_id}: {}", outcome.status),
                json!({
                    "from_entity_id": from_entity_id,
                    "to_entity_id": to_entity_id,
                    "success": outcome.success,
                }),
            )
            .await
        {
            tracing::error!(%err, swap_id, "failed to persist swap event");
        }

        let validation_results = outcome.validation_results.clone().unwrap_or(base_validation);
        Ok(SwapResponse {
            status: outcome.status,
            validation_results,
            swap: Some(outcome),
        })
    }

    pub async fn rollback_swap(
        &self,
        swap_id: i32,
        reason: String,
        rolled_back_by: String,
    ) -> LibraryResult<swap::Model> {
        let current = store::swaps::get(&*self.db, swap_id).await?;
        if !current.can_rollback() {
            return Err(LibraryError::InvalidTransition(format!(
                "swap {swap_id} is not in a rollback-eligible state"
            )));
        }

        let from_entity_id = current.from_entity_id;
        let to_entity_id = current.to_entity_id;
        let mut affected_ids = current
            .validation_results
            .as_ref()
            .map(|v| v.affected_deployment_ids.clone())
            .unwrap_or_default();
        affected_ids.sort_unstable();

        let actor = rolled_back_by;
        let reason_for_record = reason;

        let outcome = self
            .db
            .transaction::<_, swap::Model, LibraryError>(|txn| {
                Box::pin(async move {
                    let to_active = store::deployments::list_active_for_entity(txn, to_entity_id).await?;
                    for dep in to_active {
                        store::deployments::set_status(txn, dep.id, DeploymentStatus::Inactive).await?;
                    }

                    let mut reactivate = Vec::new();
                    for id in &affected_ids {
                        reactivate.push(store::deployments::get(txn, *id).await?);
                    }
                    reactivate.sort_by(|a, b| b.deployed_at.cmp(&a.deployed_at));
                    for dep in reactivate {
                        store::deployments::set_status(txn, dep.id, DeploymentStatus::Active).await?;
                    }

                    let from_entity = store::entities::lock_for_update(txn, from_entity_id).await?;
                    let mut from_am: entity::ActiveModel = from_entity.into();
                    from_am.status = Set(EntityStatus::Active);
                    store::entities::save(txn, from_am).await?;

                    let to_entity = store::entities::get(txn, to_entity_id).await?;
                    let mut to_am: entity::ActiveModel = to_entity.into();
                    to_am.status = Set(EntityStatus::Inactive);
                    store::entities::save(txn, to_am).await?;

                    let mut am: swap::ActiveModel = current.into();
                    am.status = Set(SwapStatus::RolledBack);
                    am.rolled_back_at = Set(Some(Utc::now()));
                    am.rolled_back_by = Set(Some(actor));
                    am.rollback_reason = Set(Some(reason_for_record));
                    Ok(store::swaps::save(txn, am).await?)
                })
            })
            .await
            .map_err(txn_err)?;

        if let Err(err) = self
            .publisher
            .publish_and_record(
                &*self.db,
                subjects::SWAP_ROLLED_BACK,
                "swap.rolled_back",
                "swap",
                EventSeverity::Warning,
                Some(from_entity_id),
                None,
                Some(swap_id),
                &format!("swap {swap_id} rolled back"),
                json!({"from_entity_id": from_entity_id, "to_entity_id": to_entity_id}),
            )
            .await
        {
            tracing::error!(%err, swap_id, "failed to persist swap.rolled_back event");
        }

        Ok(outcome)
    }

    pub async fn get_swap(&self, id: i32) -> LibraryResult<swap::Model> {
        store::swaps::get(&*self.db, id).await
    }

    pub async fn list_swaps(
        &self,
        filter: SwapListQuery,
        page: u64,
        page_size: u64,
    ) -> LibraryResult<Page<swap::Model>> {
        store::swaps::list(&*self.db, filter, page, page_size).await
    }
}
