//! Health and introspection (§4.7). Liveness is a pure process check;
//! readiness composes a store round-trip with the publisher's last known bus
//! connectivity, the same two collaborators every other registry method
//! depends on.

use library_entities::dto::{ComponentHealth, DetailedHealthResponse, HealthResponse};
use library_events::BusTransport;
use sea_orm::{ConnectionTrait, Statement};

use crate::RegistryService;

impl<T: BusTransport> RegistryService<T> {
    pub fn liveness(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
        }
    }

    pub async fn readiness(&self) -> DetailedHealthResponse {
        let store_connected = self.ping_store().await;
        let bus_connected = self.is_bus_connected();
        let status = if store_connected && bus_connected {
            "ok"
        } else {
            "degraded"
        };

        DetailedHealthResponse {
            status: status.to_string(),
            store: ComponentHealth {
                connected: store_connected,
                detail: (!store_connected).then(|| "database ping failed".to_string()),
            },
            bus: ComponentHealth {
                connected: bus_connected,
                detail: (!bus_connected).then(|| "event bus unreachable".to_string()),
            },
        }
    }

    async fn ping_store(&self) -> bool {
        let stmt = Statement::from_string(self.db.get_database_backend(), "SELECT 1".to_owned());
        self.db.query_one(stmt).await.is_ok()
    }
}
