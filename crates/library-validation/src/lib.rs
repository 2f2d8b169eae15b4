//! The Validation Engine (§4.4): pre-/post-deployment checks and swap
//! compatibility checks. Every check function returns a
//! `library_entities::validation::ValidationResult` rather than an error —
//! these are forensic artifacts persisted on the deployment/swap row even
//! when nothing went wrong, not exceptions thrown mid-flow.

mod post_deployment;
mod pre_deployment;
mod swap_compatibility;

pub use post_deployment::post_deployment_check;
pub use pre_deployment::pre_deployment_check;
pub use swap_compatibility::swap_compatibility_check;
