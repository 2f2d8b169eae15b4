//! Bus transports. The pub/sub bus itself is an external collaborator (§1);
//! this module defines the interface the publisher retries against and two
//! implementations: an HTTP delivery transport (the production path, grounded
//! in the same POST-and-record shape the webhook delivery service uses) and
//! an in-process broadcast transport used both as the `memory://` fallback
//! bus and as the fake transport test suites exercise the publisher against.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum BusError {
    #[error("bus unreachable: {0}")]
    Unreachable(String),
}

#[async_trait::async_trait]
pub trait BusTransport: Send + Sync {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError>;

    /// Last known connectivity state, surfaced on `/health/detailed`.
    fn is_connected(&self) -> bool;
}

/// Delivers events over HTTP to `BUS_URL`, one POST per publish attempt.
/// Mirrors the webhook delivery service's request shape: a JSON body and a
/// header naming the subject, rather than a bespoke binary wire protocol.
pub struct HttpBusTransport {
    client: reqwest::Client,
    endpoint: String,
    connected: AtomicBool,
}

impl HttpBusTransport {
    pub fn new(bus_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("library-control-plane/1.0")
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: bus_url.into(),
            connected: AtomicBool::new(true),
        }
    }
}

#[async_trait::async_trait]
impl BusTransport for HttpBusTransport {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        let result = self
            .client
            .post(&self.endpoint)
            .header("X-Event-Subject", subject)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                self.connected.store(true, Ordering::Relaxed);
                Ok(())
            }
            Ok(response) => {
                self.connected.store(false, Ordering::Relaxed);
                Err(BusError::Unreachable(format!(
                    "bus responded with status {}",
                    response.status()
                )))
            }
            Err(err) => {
                self.connected.store(false, Ordering::Relaxed);
                Err(BusError::Unreachable(err.to_string()))
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

/// In-process fan-out transport, grounded in the broadcast-channel wrapper
/// the job queue used for its own subscriber fan-out. Doubles as the
/// `memory://` bus for single-process deployments and as the backbone of
/// `FakeTransport` below.
pub struct BroadcastBusTransport {
    sender: broadcast::Sender<(String, Vec<u8>)>,
}

impl BroadcastBusTransport {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1024);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<(String, Vec<u8>)> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastBusTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BusTransport for BroadcastBusTransport {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        // `send` only errors when there are no active receivers; a bus with no
        // subscribers yet is not "down", so that case is not treated as a failure.
        let _ = self.sender.send((subject.to_string(), payload));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }
}

/// Deterministic test double: fails the first `fail_attempts` publishes (across
/// the process, not per-subject) then succeeds, and records every attempt
/// (successful or not) for assertions.
pub struct FakeTransport {
    remaining_failures: Mutex<u32>,
    published: Mutex<Vec<(String, Vec<u8>)>>,
    down: AtomicBool,
}

impl FakeTransport {
    pub fn new(fail_attempts: u32) -> Self {
        Self {
            remaining_failures: Mutex::new(fail_attempts),
            published: Mutex::new(Vec::new()),
            down: AtomicBool::new(false),
        }
    }

    pub fn always_down() -> Arc<Self> {
        let t = Self::new(0);
        t.down.store(true, Ordering::Relaxed);
        Arc::new(t)
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::Relaxed);
    }

    pub async fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl BusTransport for FakeTransport {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        self.published
            .lock()
            .await
            .push((subject.to_string(), payload.clone()));

        if self.down.load(Ordering::Relaxed) {
            return Err(BusError::Unreachable("fake transport is down".to_string()));
        }

        let mut remaining = self.remaining_failures.lock().await;
        if *remaining > 0 {
            *remaining -= 1;
            return Err(BusError::Unreachable("fake transport injected failure".to_string()));
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.down.load(Ordering::Relaxed)
    }
}

/// The single concrete transport the API/CLI binaries construct at startup,
/// dispatching to whichever backing transport `BUS_URL`'s scheme selects.
/// `RegistryService<T>` is generic over `BusTransport` for testability (unit
/// tests construct it directly against `FakeTransport`); the running service
/// only ever needs one concrete choice, decided once from configuration.
pub enum AnyBusTransport {
    Http(HttpBusTransport),
    Broadcast(BroadcastBusTransport),
}

impl AnyBusTransport {
    /// `memory://` (or any non-`http(s)://` URL) selects the in-process
    /// broadcast bus; anything else is treated as an HTTP delivery endpoint.
    pub fn from_bus_url(bus_url: &str) -> Self {
        if bus_url.starts_with("http://") || bus_url.starts_with("https://") {
            AnyBusTransport::Http(HttpBusTransport::new(bus_url))
        } else {
            AnyBusTransport::Broadcast(BroadcastBusTransport::new())
        }
    }
}

#[async_trait::async_trait]
impl BusTransport for AnyBusTransport {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        match self {
            AnyBusTransport::Http(t) => t.publish(subject, payload).await,
            AnyBusTransport::Broadcast(t) => t.publish(subject, payload).await,
        }
    }

    fn is_connected(&self) -> bool {
        match self {
            AnyBusTransport::Http(t) => t.is_connected(),
            AnyBusTransport::Broadcast(t) => t.is_connected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_url_scheme_selects_transport() {
        assert!(matches!(
            AnyBusTransport::from_bus_url("memory://local"),
            AnyBusTransport::Broadcast(_)
        ));
        assert!(matches!(
            AnyBusTransport::from_bus_url("http://bus.internal/events"),
            AnyBusTransport::Http(_)
        ));
    }

    #[tokio::test]
    async fn broadcast_transport_publish_without_subscribers_succeeds() {
        let transport = BroadcastBusTransport::new();
        let result = transport.publish("library.entity.registered", b"{}".to_vec()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn broadcast_transport_delivers_to_subscriber() {
        let transport = BroadcastBusTransport::new();
        let mut rx = transport.subscribe();
        transport.publish("library.entity.registered", b"{}".to_vec()).await.unwrap();
        let (subject, _) = rx.recv().await.unwrap();
        assert_eq!(subject, "library.entity.registered");
    }

    #[tokio::test]
    async fn fake_transport_fails_then_succeeds() {
        let transport = FakeTransport::new(2);
        assert!(transport.publish("s", vec![]).await.is_err());
        assert!(transport.publish("s", vec![]).await.is_err());
        assert!(transport.publish("s", vec![]).await.is_ok());
        assert_eq!(transport.published().await.len(), 3);
    }

    #[tokio::test]
    async fn fake_transport_always_down_never_succeeds() {
        let transport = FakeTransport::always_down();
        assert!(transport.publish("s", vec![]).await.is_err());
        assert!(!transport.is_connected());
    }
}
