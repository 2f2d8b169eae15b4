//! The wire-format payload envelope published on every subject (§4.5).

use library_core::UtcDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use uuid::Uuid;

/// Dot-separated hierarchical subject names. Wildcard consumers match on
/// `library.entity.*`, `library.swap.*`, etc.
pub mod subjects {
    pub const ENTITY_REGISTERED: &str = "library.entity.registered";
    pub const ENTITY_UPDATED: &str = "library.entity.updated";
    pub const ENTITY_DELETED: &str = "library.entity.deleted";
    pub const DEPLOYMENT_COMPLETED: &str = "library.deployment.completed";
    pub const DEPLOYMENT_FAILED: &str = "library.deployment.failed";
    pub const DEPLOYMENT_ROLLED_BACK: &str = "library.deployment.rolled_back";
    pub const SWAP_INITIATED: &str = "library.swap.initiated";
    pub const SWAP_COMPLETED: &str = "library.swap.completed";
    pub const SWAP_FAILED: &str = "library.swap.failed";
    pub const SWAP_ROLLED_BACK: &str = "library.swap.rolled_back";
    pub const HEALTH_DEGRADED: &str = "library.health.degraded";
    pub const HEALTH_RECOVERED: &str = "library.health.recovered";
}

/// `{event_id, event_type, occurred_at, source, entity_id?, deployment_id?,
/// swap_id?, data, metadata}` — encoded as UTF-8 JSON on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub event_type: String,
    pub occurred_at: UtcDateTime,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_id: Option<i32>,
    pub data: Json,
    pub metadata: Json,
}

impl EventEnvelope {
    pub fn new(
        event_type: impl Into<String>,
        entity_id: Option<i32>,
        deployment_id: Option<i32>,
        swap_id: Option<i32>,
        data: Json,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.into(),
            occurred_at: chrono::Utc::now(),
            source: "library_service".to_string(),
            entity_id,
            deployment_id,
            swap_id,
            data,
            metadata: serde_json::json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_null_reference_fields() {
        let envelope = EventEnvelope::new("library.entity.registered", Some(1), None, None, serde_json::json!({"name": "alpha"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["source"], "library_service");
        assert!(value.get("deployment_id").is_none());
        assert!(value.get("swap_id").is_none());
        assert_eq!(value["entity_id"], 1);
    }
}
