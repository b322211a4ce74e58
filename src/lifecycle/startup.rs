//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into a ready-to-serve snapshot
//! - Initialize subsystems in dependency order:
//!   site → routes → store → codec → resolver → reporter
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The same path builds snapshots on reload, where errors keep the old one

use std::sync::Arc;
use thiserror::Error;

use crate::config::ResolverConfig;
use crate::facets::FacetRegistry;
use crate::identifier::{IdentifierCodec, UrlSafeCodec};
use crate::resolver::{Reporter, Resolver, Site};
use crate::routing::{PatternError, Router};
use crate::store::EntityStore;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid site base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid route: {0}")]
    Route(#[from] PatternError),
}

/// Everything a request needs, built once per configuration.
pub struct Snapshot {
    pub config: ResolverConfig,
    pub router: Arc<Router>,
    pub store: Arc<EntityStore>,
    pub resolver: Resolver,
    pub reporter: Reporter,
    pub facets: FacetRegistry,
}

impl Snapshot {
    pub fn build(config: ResolverConfig) -> Result<Self, StartupError> {
        let site = Site::new(&config.site.base_url).map_err(|source| StartupError::BaseUrl {
            url: config.site.base_url.clone(),
            source,
        })?;
        let router = Arc::new(Router::from_config(&config.routes)?);
        let store = Arc::new(EntityStore::from_config(&config.entities));
        let codec: Arc<dyn IdentifierCodec> = Arc::new(UrlSafeCodec);

        let resolver = Resolver::new(
            site.clone(),
            config.site.entity_parameter.clone(),
            store.clone(),
            router.clone(),
            codec.clone(),
        );
        let reporter = Reporter::new(
            site,
            router.clone(),
            config.site.canonical_route.clone(),
            config.site.entity_parameter.clone(),
            codec,
        );
        let facets = FacetRegistry::from_config(&config.facets);

        tracing::info!(
            base_url = %config.site.base_url,
            routes = router.len(),
            entities = store.len(),
            "Resolver snapshot built"
        );

        Ok(Self {
            config,
            router,
            store,
            resolver,
            reporter,
            facets,
        })
    }
}
