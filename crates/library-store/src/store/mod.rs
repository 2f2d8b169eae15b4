//! The Store Gateway: transactional CRUD over `entities`, `deployments`,
//! `swaps`, `events`, `dependencies`, `performance_metrics`, with the
//! soft-delete predicate and pagination centralized here rather than left to
//! ad-hoc queries at call sites (see design note on soft-delete via query
//! predicate).
//!
//! Every function takes a generic `C: ConnectionTrait` so it can run either
//! against the pooled connection directly or against an open
//! `DatabaseTransaction`, which is how `library-registry` composes several of
//! these calls into the atomic deployment/swap transactions of §4.2/§4.3.

pub mod dependencies;
pub mod deployments;
pub mod entities;
pub mod events;
pub mod pagination;
pub mod performance_metrics;
pub mod swaps;
