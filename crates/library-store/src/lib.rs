//! The Store Gateway (§4.6): connection management plus transactional CRUD
//! over the six control-plane tables, with soft-delete and pagination
//! centralized so callers never issue bare queries.

pub use sea_orm;
mod connection;
pub mod store;

pub use connection::{establish_connection, DbConnection};

// Export test utilities for use by other crates in their tests
pub mod test_utils;
