//! The Event Publisher (§4.5): envelope encoding, subject naming, retrying
//! delivery with graceful degradation, and the post-commit audit-log write
//! into `events` (see `library_store::store::events`).

pub mod envelope;
pub mod publisher;
pub mod transport;

pub use envelope::{subjects, EventEnvelope};
pub use publisher::{backoff_schedule, EventPublisher};
pub use transport::{
    AnyBusTransport, BroadcastBusTransport, BusError, BusTransport, FakeTransport, HttpBusTransport,
};
