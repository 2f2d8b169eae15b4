use sea_orm_migration::prelude::*;

/// Initial schema: `entities`, `deployments`, `swaps`, `events`, `dependencies`,
/// `performance_metrics`, per the persisted-state layout of §6.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("entities"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("entity_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("category")).string().null())
                    .col(ColumnDef::new(Alias::new("description")).text().null())
                    .col(ColumnDef::new(Alias::new("version")).string().not_null())
                    .col(ColumnDef::new(Alias::new("author")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("tags"))
                            .json()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("config"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("parameters"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("requirements"))
                            .json()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .string()
                            .not_null()
                            .default("registered"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("health_status"))
                            .string()
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("deployed_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("deployed_by")).string().null())
                    .col(ColumnDef::new(Alias::new("deployment_config")).json().null())
                    .col(
                        ColumnDef::new(Alias::new("resource_hints"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("created_by")).string().null())
                    .col(ColumnDef::new(Alias::new("updated_by")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("deleted_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("deleted_by")).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entities_type")
                    .table(Alias::new("entities"))
                    .col(Alias::new("entity_type"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_entities_status")
                    .table(Alias::new("entities"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_entities_category")
                    .table(Alias::new("entities"))
                    .col(Alias::new("category"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_entities_health_status")
                    .table(Alias::new("entities"))
                    .col(Alias::new("health_status"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_entities_created_at")
                    .table(Alias::new("entities"))
                    .col(Alias::new("created_at"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_entities_name")
                    .table(Alias::new("entities"))
                    .col(Alias::new("name"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("deployments"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("entity_id")).integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("version_snapshot"))
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("environment")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("config_snapshot"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("parameters_snapshot"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("deployed_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("deployed_by")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("deployment_method"))
                            .string()
                            .not_null()
                            .default("standard"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("rolled_back_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("rolled_back_by")).string().null())
                    .col(ColumnDef::new(Alias::new("rollback_reason")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("previous_deployment_id"))
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("validation_results")).json().null())
                    .col(ColumnDef::new(Alias::new("error_logs")).text().null())
                    .col(ColumnDef::new(Alias::new("duration_seconds")).double().null())
                    .col(ColumnDef::new(Alias::new("health_checks")).json().null())
                    .col(
                        ColumnDef::new(Alias::new("last_health_check"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deployments_entity")
                            .from(Alias::new("deployments"), Alias::new("entity_id"))
                            .to(Alias::new("entities"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deployments_entity_env")
                    .table(Alias::new("deployments"))
                    .col(Alias::new("entity_id"))
                    .col(Alias::new("environment"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_deployments_status")
                    .table(Alias::new("deployments"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("swaps"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("from_entity_id"))
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("to_entity_id")).integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("from_deployment_id"))
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("to_deployment_id")).integer().null())
                    .col(
                        ColumnDef::new(Alias::new("swap_type"))
                            .string()
                            .not_null()
                            .default("manual"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .string()
                            .not_null()
                            .default("initiated"),
                    )
                    .col(ColumnDef::new(Alias::new("reason")).text().null())
                    .col(ColumnDef::new(Alias::new("initiated_by")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("initiated_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("completed_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("duration_seconds")).double().null())
                    .col(
                        ColumnDef::new(Alias::new("downtime_milliseconds"))
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("success")).boolean().null())
                    .col(ColumnDef::new(Alias::new("error_message")).text().null())
                    .col(ColumnDef::new(Alias::new("validation_results")).json().null())
                    .col(
                        ColumnDef::new(Alias::new("rolled_back_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("rolled_back_by")).string().null())
                    .col(ColumnDef::new(Alias::new("rollback_reason")).text().null())
                    .col(ColumnDef::new(Alias::new("target_environment")).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_swaps_from_entity")
                            .from(Alias::new("swaps"), Alias::new("from_entity_id"))
                            .to(Alias::new("entities"), Alias::new("id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_swaps_to_entity")
                            .from(Alias::new("swaps"), Alias::new("to_entity_id"))
                            .to(Alias::new("entities"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_swaps_from_entity")
                    .table(Alias::new("swaps"))
                    .col(Alias::new("from_entity_id"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_swaps_to_entity")
                    .table(Alias::new("swaps"))
                    .col(Alias::new("to_entity_id"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("dependencies"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("entity_id")).integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("depends_on_entity_id"))
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("dependency_type"))
                            .string()
                            .not_null()
                            .default("required"),
                    )
                    .col(ColumnDef::new(Alias::new("min_version")).string().null())
                    .col(ColumnDef::new(Alias::new("max_version")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dependencies_entity")
                            .from(Alias::new("dependencies"), Alias::new("entity_id"))
                            .to(Alias::new("entities"), Alias::new("id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dependencies_depends_on")
                            .from(Alias::new("dependencies"), Alias::new("depends_on_entity_id"))
                            .to(Alias::new("entities"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dependencies_unique_edge")
                    .table(Alias::new("dependencies"))
                    .col(Alias::new("entity_id"))
                    .col(Alias::new("depends_on_entity_id"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("events"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("event_type")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("event_category"))
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("severity"))
                            .string()
                            .not_null()
                            .default("info"),
                    )
                    .col(ColumnDef::new(Alias::new("entity_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("deployment_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("swap_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("message")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("details"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .col(ColumnDef::new(Alias::new("user_id")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("source"))
                            .string()
                            .not_null()
                            .default("library_service"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("occurred_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_entity")
                    .table(Alias::new("events"))
                    .col(Alias::new("entity_id"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_events_occurred_at")
                    .table(Alias::new("events"))
                    .col(Alias::new("occurred_at"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("performance_metrics"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("entity_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("deployment_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("metric_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("metric_value")).double().not_null())
                    .col(ColumnDef::new(Alias::new("unit")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("recorded_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("metadata"))
                            .json()
                            .not_null()
                            .default("{}"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_metrics_entity")
                            .from(Alias::new("performance_metrics"), Alias::new("entity_id"))
                            .to(Alias::new("entities"), Alias::new("id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_metrics_deployment")
                            .from(Alias::new("performance_metrics"), Alias::new("deployment_id"))
                            .to(Alias::new("deployments"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_performance_metrics_entity")
                    .table(Alias::new("performance_metrics"))
                    .col(Alias::new("entity_id"))
                    .col(Alias::new("recorded_at"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("performance_metrics")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("events")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("dependencies")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("swaps")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("deployments")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("entities")).to_owned())
            .await?;
        Ok(())
    }
}
