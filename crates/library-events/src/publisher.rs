//! The Event Publisher (§4.5): retrying, degrade-gracefully delivery plus the
//! mandatory post-commit persistence of every publish attempt as an `events`
//! row, grounded in the webhook delivery service's persist-then-deliver
//! pattern (there the delivery record is a `webhook_deliveries` row written
//! before the HTTP call; here the analogous row is `events`, written after
//! the delivery attempt is exhausted since delivery has no dedicated
//! "pending" status to track).

use std::sync::Arc;
use std::time::Duration;

use library_core::{LibraryResult, UtcDateTime};
use library_entities::event;
use library_entities::types::EventSeverity;
use sea_orm::ConnectionTrait;
use serde_json::Value as Json;

use crate::envelope::EventEnvelope;
use crate::transport::BusTransport;

const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_FACTOR: u32 = 2;
const DEFAULT_BUDGET: Duration = Duration::from_secs(60);

/// The inter-attempt delays for an exponential backoff sequence starting at
/// `initial`, doubling each time (capped at `cap`), stopping once either
/// `max_attempts` delays have been produced or the cumulative wait would
/// exceed `budget`. The first attempt itself is not represented here — it
/// happens immediately before the first delay is consulted.
pub fn backoff_schedule(
    initial: Duration,
    factor: u32,
    cap: Duration,
    budget: Duration,
    max_attempts: u32,
) -> Vec<Duration> {
    let mut delays = Vec::new();
    let mut current = initial;
    let mut elapsed = Duration::ZERO;

    for _ in 0..max_attempts.saturating_sub(1) {
        if elapsed + current > budget {
            break;
        }
        delays.push(current);
        elapsed += current;
        current = (current * factor).min(cap);
    }

    delays
}

pub struct EventPublisher<T: BusTransport> {
    transport: Arc<T>,
    initial_backoff: Duration,
    factor: u32,
    backoff_cap: Duration,
    budget: Duration,
    max_attempts: u32,
}

impl<T: BusTransport> EventPublisher<T> {
    pub fn new(transport: Arc<T>, max_attempts: u32, backoff_cap_sec: u64) -> Self {
        Self {
            transport,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            factor: DEFAULT_FACTOR,
            backoff_cap: Duration::from_secs(backoff_cap_sec),
            budget: DEFAULT_BUDGET,
            max_attempts,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Attempts delivery with retry, then unconditionally persists an `events`
    /// row recording the outcome — the only writer of that table.
    #[allow(clippy::too_many_arguments)]
    pub async fn publish_and_record<C: ConnectionTrait>(
        &self,
        conn: &C,
        subject: &str,
        event_type: &str,
        event_category: &str,
        severity: EventSeverity,
        entity_id: Option<i32>,
        deployment_id: Option<i32>,
        swap_id: Option<i32>,
        message: &str,
        data: Json,
    ) -> LibraryResult<event::Model> {
        let envelope = EventEnvelope::new(event_type, entity_id, deployment_id, swap_id, data.clone());
        let delivered = self.try_deliver(subject, &envelope).await;
        if !delivered {
            tracing::warn!(
                subject,
                event_type,
                "event publish exhausted retry budget; bus considered degraded"
            );
        }

        library_store::store::events::record(
            conn,
            event_type,
            event_category,
            severity,
            entity_id,
            deployment_id,
            swap_id,
            message,
            data,
            None,
            "library_service",
        )
        .await
    }

    async fn try_deliver(&self, subject: &str, envelope: &EventEnvelope) -> bool {
        let payload = match serde_json::to_vec(envelope) {
            Ok(p) => p,
            Err(err) => {
                tracing::error!(%err, "failed to encode event envelope");
                return false;
            }
        };

        if self.transport.publish(subject, payload.clone()).await.is_ok() {
            return true;
        }

        let schedule = backoff_schedule(
            self.initial_backoff,
            self.factor,
            self.backoff_cap,
            self.budget,
            self.max_attempts,
        );

        for delay in schedule {
            tokio::time::sleep(delay).await;
            if self.transport.publish(subject, payload.clone()).await.is_ok() {
                return true;
            }
        }

        false
    }
}

/// The `occurred_at` field's wall-clock source, kept as a function so tests
/// can assert monotonicity without reaching into `chrono` directly.
pub fn now() -> UtcDateTime {
    chrono::Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FakeTransport;
    use library_store::test_utils::TestDatabase;
    use std::time::Duration;

    #[test]
    fn backoff_schedule_doubles_up_to_cap() {
        let schedule = backoff_schedule(
            Duration::from_secs(1),
            2,
            Duration::from_secs(30),
            Duration::from_secs(60),
            10,
        );
        assert_eq!(schedule[0], Duration::from_secs(1));
        assert_eq!(schedule[1], Duration::from_secs(2));
        assert_eq!(schedule[2], Duration::from_secs(4));
        assert!(schedule.iter().all(|d| *d <= Duration::from_secs(30)));
    }

    #[test]
    fn backoff_schedule_respects_wall_clock_budget() {
        let schedule = backoff_schedule(
            Duration::from_secs(1),
            2,
            Duration::from_secs(30),
            Duration::from_secs(10),
            100,
        );
        let total: Duration = schedule.iter().sum();
        assert!(total <= Duration::from_secs(10));
    }

    #[test]
    fn backoff_schedule_respects_max_attempts() {
        let schedule = backoff_schedule(
            Duration::from_millis(1),
            2,
            Duration::from_secs(30),
            Duration::from_secs(600),
            3,
        );
        assert_eq!(schedule.len(), 2);
    }

    #[tokio::test]
    async fn publish_succeeds_after_transient_failures_and_records_event() {
        let db = TestDatabase::new().await.unwrap();
        let transport = Arc::new(FakeTransport::new(2));
        let publisher = EventPublisher::new(transport.clone(), 6, 1);
        // keep the test fast: override the default backoff timings is not
        // exposed publicly, so use a transport whose failure count is small
        // enough that the default 1s/2s schedule still completes well under
        // typical test timeouts.
        let event = publisher
            .publish_and_record(
                db.connection(),
                crate::envelope::subjects::ENTITY_REGISTERED,
                "entity.registered",
                "entity",
                EventSeverity::Info,
                Some(1),
                None,
                None,
                "entity alpha registered",
                serde_json::json!({"name": "alpha"}),
            )
            .await
            .unwrap();
        assert_eq!(event.event_type, "entity.registered");
        assert_eq!(transport.published().await.len(), 3);
    }

    #[tokio::test]
    async fn publish_degrades_gracefully_when_bus_is_down() {
        let db = TestDatabase::new().await.unwrap();
        let transport = crate::transport::FakeTransport::always_down();
        let publisher = EventPublisher::new(transport.clone(), 2, 1);
        let event = publisher
            .publish_and_record(
                db.connection(),
                crate::envelope::subjects::ENTITY_REGISTERED,
                "entity.registered",
                "entity",
                EventSeverity::Info,
                Some(1),
                None,
                None,
                "entity x registered",
                serde_json::json!({"name": "x"}),
            )
            .await
            .unwrap();
        assert_eq!(event.event_type, "entity.registered");
        assert!(!publisher.is_connected());
    }
}
