//! Database migrations for the strategy library control plane.
//!
//! Schema for `entities, deployments, swaps, events, dependencies,
//! performance_metrics` (§6), run automatically at store-connection
//! bootstrap via `sea-orm-migration`.

pub use sea_orm_migration::prelude::*;

mod migration;
pub use migration::Migrator;
