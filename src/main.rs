//! RDF entity URI resolver service.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────┐
//!                   │                   URI RESOLVER                        │
//!                   │                                                       │
//!  Form / JSON      │  ┌─────────┐   ┌────────────┐   ┌──────────────┐      │
//!  ─────────────────┼─▶│  http   │──▶│ classifier │──▶│   routing    │      │
//!                   │  │ server  │   └─────┬──────┘   │ match_path   │      │
//!                   │  └────▲────┘         │          └──────┬───────┘      │
//!                   │       │              ▼                 ▼              │
//!                   │       │        ┌───────────┐    ┌──────────────┐      │
//!                   │       │        │   store   │    │  identifier  │      │
//!                   │       │        │  exists   │    │    decode    │      │
//!                   │       │        └─────┬─────┘    └──────┬───────┘      │
//!                   │       │              └───────┬─────────┘              │
//!  Redirect / page  │  ┌────┴─────┐        ┌───────▼───────┐                │
//!  ◀────────────────┼──│ reporter │◀───────│   outcome     │                │
//!                   │  └──────────┘        └───────────────┘                │
//!                   │                                                       │
//!                   │  config (+ hot reload) · observability · lifecycle    │
//!                   └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use rdf_uri_resolver::config::{load_config, ConfigWatcher, ResolverConfig};
use rdf_uri_resolver::http::HttpServer;
use rdf_uri_resolver::lifecycle::{signals, Shutdown};
use rdf_uri_resolver::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("rdf-uri-resolver v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?config_path,
        bind_address = %config.listener.bind_address,
        base_url = %config.site.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        None => {
            let (_tx, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
