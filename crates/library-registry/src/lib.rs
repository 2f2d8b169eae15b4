//! The registry: Deployment Manager (§4.2) and Swap Engine (§4.3), composed
//! with the Validation Engine and the Event Publisher on top of the Store
//! Gateway. `RegistryService` is the single facade `library-api` calls —
//! mirroring the "Flow" in the component overview: API Surface →
//! (Deployment Manager | Swap Engine) → Validation Engine → Store Gateway →
//! Event Publisher.

mod deployments;
mod entities;
mod health;
mod performance;
mod swaps;

use std::sync::Arc;

use library_events::EventPublisher;
use library_events::BusTransport;
use library_store::DbConnection;

pub use deployments::*;
pub use entities::*;
pub use health::*;
pub use performance::*;
pub use swaps::*;

pub struct RegistryService<T: BusTransport> {
    db: Arc<DbConnection>,
    publisher: EventPublisher<T>,
}

impl<T: BusTransport> RegistryService<T> {
    pub fn new(db: Arc<DbConnection>, publisher: EventPublisher<T>) -> Self {
        Self { db, publisher }
    }

    pub fn db(&self) -> &DbConnection {
        &self.db
    }

    pub fn is_bus_connected(&self) -> bool {
        self.publisher.is_connected()
    }
}

/// Collapses `sea_orm`'s transaction wrapper error back into the domain
/// error taxonomy, so every registry method returns a plain `LibraryResult`.
fn txn_err(err: sea_orm::TransactionError<library_core::LibraryError>) -> library_core::LibraryError {
    match err {
        sea_orm::TransactionError::Connection(db_err) => library_core::LibraryError::from(db_err),
        sea_orm::TransactionError::Transaction(err) => err,
    }
}
