//! `serve`: loads configuration, establishes the store connection (running
//! pending migrations), wires up the event bus transport and the registry,
//! then binds the HTTP API router — the minimal process-supervision surface
//! named in §10's CLI section.

use std::sync::Arc;

use clap::Args;
use library_api::state::AppState;
use library_core::config::AppConfig;
use library_events::{AnyBusTransport, EventPublisher};
use library_registry::RegistryService;

#[derive(Args, Debug, Default)]
pub struct ServeCommand;

impl ServeCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        let config = AppConfig::from_env();

        tracing::info!(listen_addr = %config.listen_addr, store_url = %config.store_url, "starting strategy library control plane");

        let db = library_store::establish_connection(&config.store_url).await?;

        let transport = Arc::new(AnyBusTransport::from_bus_url(&config.bus_url));
        let publisher = EventPublisher::new(
            transport,
            config.retry_max_attempts,
            config.retry_backoff_cap_sec,
        );

        let registry = RegistryService::new(db, publisher);
        let state = Arc::new(AppState::new(registry, config.page_size_max));

        let app = library_api::build_router(state, &config.api_v1_prefix);

        let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
        tracing::info!(addr = %config.listen_addr, "listening");
        axum::serve(listener, app).await?;

        Ok(())
    }
}
