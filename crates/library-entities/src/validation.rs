//! Structured validation result, persisted as data on deployment and swap rows
//! rather than thrown as an exception (see the validation engine's design note:
//! these are forensic artifacts, kept even on success).

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct ValidationResult {
    pub passed: bool,
    pub checks: BTreeMap<String, bool>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Set only by the swap compatibility check: `passed && warnings.is_empty()`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_downtime_ms: Option<i64>,
    /// Deployment ids the forward swap deactivated, recorded here so swap-rollback
    /// reactivates exactly that set deterministically (no dedicated column for it
    /// in the persisted layout).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_deployment_ids: Vec<i32>,
}

impl ValidationResult {
    pub fn builder() -> ValidationResultBuilder {
        ValidationResultBuilder::default()
    }
}

#[derive(Default)]
pub struct ValidationResultBuilder {
    checks: BTreeMap<String, bool>,
    errors: Vec<String>,
    warnings: Vec<String>,
    estimated_downtime_ms: Option<i64>,
    affected_deployment_ids: Vec<i32>,
    is_swap: bool,
}

impl ValidationResultBuilder {
    pub fn check(mut self, name: impl Into<String>, passed: bool) -> Self {
        self.checks.insert(name.into(), passed);
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    pub fn warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(message.into());
        self
    }

    pub fn estimated_downtime_ms(mut self, ms: i64) -> Self {
        self.estimated_downtime_ms = Some(ms);
        self
    }

    pub fn affected_deployment_ids(mut self, ids: Vec<i32>) -> Self {
        self.affected_deployment_ids = ids;
        self
    }

    /// Mark this as a swap-compatibility result, which additionally reports `compatible`.
    pub fn as_swap(mut self) -> Self {
        self.is_swap = true;
        self
    }

    pub fn build(self) -> ValidationResult {
        let passed = self.errors.is_empty();
        let compatible = self.is_swap.then(|| passed && self.warnings.is_empty());
        ValidationResult {
            passed,
            checks: self.checks,
            errors: self.errors,
            warnings: self.warnings,
            compatible,
            estimated_downtime_ms: self.estimated_downtime_ms,
            affected_deployment_ids: self.affected_deployment_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_iff_no_errors() {
        let result = ValidationResult::builder()
            .check("a", true)
            .warning("careful")
            .build();
        assert!(result.passed);

        let result = ValidationResult::builder().error("boom").build();
        assert!(!result.passed);
    }

    #[test]
    fn swap_compatible_requires_no_warnings() {
        let result = ValidationResult::builder()
            .as_swap()
            .warning("missing config key")
            .build();
        assert_eq!(result.compatible, Some(false));

        let result = ValidationResult::builder().as_swap().build();
        assert_eq!(result.compatible, Some(true));
    }
}
