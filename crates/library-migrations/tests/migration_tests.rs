use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use library_migrations::Migrator;

async fn sqlite_db() -> DatabaseConnection {
    Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite connection")
}

#[tokio::test]
async fn migration_up_creates_all_tables() -> anyhow::Result<()> {
    let db = sqlite_db().await;
    Migrator::up(&db, None).await?;

    for table in [
        "entities",
        "deployments",
        "swaps",
        "dependencies",
        "events",
        "performance_metrics",
    ] {
        let stmt = Statement::from_string(
            db.get_database_backend(),
            format!(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='{}'",
                table
            ),
        );
        let row = db.query_one(stmt).await?;
        assert!(row.is_some(), "table {table} should exist after migration up");
    }

    Ok(())
}

#[tokio::test]
async fn migration_down_drops_all_tables() -> anyhow::Result<()> {
    let db = sqlite_db().await;
    Migrator::up(&db, None).await?;
    Migrator::down(&db, None).await?;

    for table in ["entities", "deployments", "swaps", "dependencies", "events"] {
        let stmt = Statement::from_string(
            db.get_database_backend(),
            format!(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='{}'",
                table
            ),
        );
        let row = db.query_one(stmt).await?;
        assert!(row.is_none(), "table {table} should be dropped after migration down");
    }

    Ok(())
}

#[tokio::test]
async fn migration_status_reports_pending_then_none() -> anyhow::Result<()> {
    let db = sqlite_db().await;

    let pending_before = Migrator::get_pending_migrations(&db).await?;
    assert!(!pending_before.is_empty());

    Migrator::up(&db, None).await?;

    let pending_after = Migrator::get_pending_migrations(&db).await?;
    assert!(pending_after.is_empty());

    Ok(())
}
