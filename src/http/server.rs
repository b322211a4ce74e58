//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeouts, body limit, request ID)
//! - Bind server to listener
//! - Swap in new resolver snapshots when the configuration changes

use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, Semaphore};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ResolverConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::{Snapshot, StartupError};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<Snapshot>>,

    /// Permits for resolutions on blocking workers. Sized at startup.
    pub resolutions: Arc<Semaphore>,
}

impl AppState {
    pub fn new(snapshot: Snapshot) -> Self {
        let permits = snapshot
            .config
            .timeouts
            .max_blocking_resolutions
            .min(Semaphore::MAX_PERMITS);
        Self {
            inner: Arc::new(ArcSwap::from_pointee(snapshot)),
            resolutions: Arc::new(Semaphore::new(permits)),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.load_full()
    }

    /// Build a snapshot from `config` and make it current.
    /// On error the previous snapshot stays in place.
    pub fn reload(&self, config: ResolverConfig) -> Result<(), StartupError> {
        let snapshot = Snapshot::build(config)?;
        self.inner.store(Arc::new(snapshot));
        Ok(())
    }
}

/// HTTP server for the resolver.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self, StartupError> {
        let state = AppState::new(Snapshot::build(config)?);
        let router = Self::build_router(state.clone(), &state.snapshot().config);
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    /// Layer settings are fixed at startup; reloads only swap the snapshot.
    #[allow(deprecated)]
    fn build_router(state: AppState, config: &ResolverConfig) -> Router {
        Router::new()
            .route("/", get(handlers::form))
            .route("/resolve", get(handlers::form).post(handlers::submit))
            .route("/api/resolve", post(handlers::api_resolve))
            .route("/api/facets/query", post(handlers::facet_query))
            .route("/api/facets/results", post(handlers::facet_results))
            .route("/api/workflow/{bundle}/targets", get(handlers::workflow_targets))
            .route("/api/constraints/shared-in", post(handlers::shared_in))
            .route("/health", get(handlers::health))
            .fallback(handlers::entity_page)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener, until
    /// `shutdown` fires. Configurations received on `config_updates`
    /// replace the running snapshot.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ResolverConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match state.reload(config) {
                    Ok(()) => {
                        metrics::record_config_reload("ok");
                        tracing::info!("Configuration reloaded");
                    }
                    Err(e) => {
                        metrics::record_config_reload("error");
                        tracing::error!(error = %e, "Rejected new configuration, keeping current");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
