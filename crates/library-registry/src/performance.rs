//! Thin pass-through to the performance metrics store. The control plane
//! persists what it is given here; computing or aggregating risk/trading
//! figures is a non-goal (§1).

use library_core::LibraryResult;
use library_entities::dto::{Page, PerformanceMetricListQuery};
use library_entities::performance_metric;
use library_events::BusTransport;
use library_store::store;
use serde_json::Value as Json;

use crate::RegistryService;

impl<T: BusTransport> RegistryService<T> {
    #[allow(clippy::too_many_arguments)]
    pub async fn record_performance_metric(
        &self,
        entity_id: i32,
        deployment_id: Option<i32>,
        metric_name: String,
        metric_value: f64,
        unit: Option<String>,
        metadata: Json,
    ) -> LibraryResult<performance_metric::Model> {
        store::performance_metrics::record(
            &*self.db,
            entity_id,
            deployment_id,
            &metric_name,
            metric_value,
            unit,
            metadata,
        )
        .await
    }

    pub async fn list_performance_metrics(
        &self,
        entity_id: i32,
        filter: PerformanceMetricListQuery,
        page: u64,
        page_size: u64,
    ) -> LibraryResult<Page<performance_metric::Model>> {
        store::performance_metrics::list_for_entity(&*self.db, entity_id, filter, page, page_size).await
    }
}
