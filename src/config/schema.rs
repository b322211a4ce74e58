//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the resolver.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for the resolver service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// The site this resolver answers for.
    pub site: SiteConfig,

    /// Routing table used to recognise entity URLs.
    pub routes: Vec<RouteConfig>,

    /// Entities known to the lookup store.
    pub entities: Vec<EntityConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Workflow transitions keyed by bundle.
    pub workflow: BTreeMap<String, WorkflowConfig>,

    /// Arbitrary facet definitions keyed by plugin id.
    pub facets: BTreeMap<String, BTreeMap<String, FacetItemConfig>>,

    pub security: SecurityConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            site: SiteConfig::default(),
            routes: default_routes(),
            entities: Vec::new(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            workflow: BTreeMap::new(),
            facets: BTreeMap::new(),
            security: SecurityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 1_000,
        }
    }
}

/// Site identity used to tell local URLs from external ones.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL of the site, including any path prefix.
    pub base_url: String,

    /// Name of the route parameter carrying the encoded entity identifier.
    pub entity_parameter: String,

    /// Route used to build canonical entity display URLs.
    pub canonical_route: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            entity_parameter: "rdf_entity".to_string(),
            canonical_route: "entity.rdf_entity.canonical".to_string(),
        }
    }
}

/// A named route pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier, e.g. "entity.rdf_entity.canonical".
    pub name: String,

    /// Path pattern, e.g. "/rdf_entity/{rdf_entity}".
    pub path: String,

    /// Route priority (higher = checked first).
    #[serde(default)]
    pub priority: u32,
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            name: "entity.rdf_entity.canonical".to_string(),
            path: "/rdf_entity/{rdf_entity}".to_string(),
            priority: 0,
        },
        RouteConfig {
            name: "entity.rdf_entity.edit_form".to_string(),
            path: "/rdf_entity/{rdf_entity}/edit".to_string(),
            priority: 0,
        },
        RouteConfig {
            name: "entity.node.canonical".to_string(),
            path: "/node/{node}".to_string(),
            priority: 0,
        },
    ]
}

/// An entity seeded into the lookup store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntityConfig {
    pub id: String,

    /// Bundle (entity sub-type), e.g. "collection" or "solution".
    #[serde(default)]
    pub bundle: String,

    #[serde(default)]
    pub label: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Deadline for a single resolution in milliseconds.
    pub resolve_ms: u64,

    /// Resolutions allowed on blocking workers at once, including ones
    /// whose caller already timed out.
    pub max_blocking_resolutions: usize,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            resolve_ms: 2_000,
            max_blocking_resolutions: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Workflow settings for one bundle.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Target state → source state → roles allowed to perform the move.
    pub transitions: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// One selectable item of an arbitrary facet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacetItemConfig {
    pub label: String,
    pub field_name: String,
    pub field_condition: String,
    #[serde(default)]
    pub field_operator: Option<String>,
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}
