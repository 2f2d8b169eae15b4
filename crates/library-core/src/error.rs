//! Common error types used across all control-plane crates

use crate::error_builder;
use crate::problemdetails::Problem;
use sea_orm::DbErr;
use std::collections::HashMap;
use thiserror::Error;

/// Domain error taxonomy for the registry, shared by the validation engine,
/// deployment manager, swap engine and API surface.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("validation failed")]
    ValidationFailed {
        errors: Vec<String>,
        warnings: Vec<String>,
        checks: HashMap<String, bool>,
    },

    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("no rollback target: {0}")]
    NoRollbackTarget(String),

    #[error("dependency missing: {0}")]
    DependencyMissing(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DbErr> for LibraryError {
    fn from(err: DbErr) -> Self {
        LibraryError::Internal(anyhow::anyhow!(err))
    }
}

impl From<LibraryError> for Problem {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::NotFound(resource) => error_builder::not_found(resource).build(),
            LibraryError::AlreadyExists(resource) => {
                error_builder::already_exists(resource).build()
            }
            LibraryError::ValidationFailed {
                errors,
                warnings,
                checks,
            } => error_builder::validation_failed()
                .detail("one or more validation checks failed")
                .value("errors", errors)
                .value("warnings", warnings)
                .value("checks", checks)
                .build(),
            LibraryError::InvalidTransition(detail) => {
                error_builder::invalid_transition(detail).build()
            }
            LibraryError::NoRollbackTarget(detail) => {
                error_builder::no_rollback_target(detail).build()
            }
            LibraryError::DependencyMissing(detail) => {
                error_builder::dependency_missing(detail).build()
            }
            LibraryError::Conflict(detail) => error_builder::conflict(detail).build(),
            LibraryError::Internal(err) => error_builder::internal_server_error()
                .detail(err.to_string())
                .build(),
        }
    }
}

/// Result type alias for service operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Legacy alias kept for readability at call sites that only care about infra errors.
pub type ServiceResult<T> = LibraryResult<T>;
