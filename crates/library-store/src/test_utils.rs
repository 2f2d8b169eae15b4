//! Test utilities for store-backed integration tests.
//!
//! The control-plane test suite runs against an in-process sqlite database
//! rather than a live Postgres container (see the ambient test-tooling note):
//! migrations are deterministic and fast enough that a fresh schema per test
//! is cheaper than schema-per-test-isolation tricks against a shared server.

use crate::DbConnection;
use library_migrations::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::sync::Arc;

/// An isolated in-memory database with the control-plane schema applied.
pub struct TestDatabase {
    pub db: Arc<DbConnection>,
}

impl TestDatabase {
    /// Opens a fresh `sqlite::memory:` connection and runs all migrations.
    pub async fn new() -> anyhow::Result<Self> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;
        Ok(Self { db: Arc::new(db) })
    }

    pub fn connection(&self) -> &DbConnection {
        &self.db
    }

    pub fn connection_arc(&self) -> Arc<DbConnection> {
        Arc::clone(&self.db)
    }
}
