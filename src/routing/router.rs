//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a path
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over routes (acceptable for typical route counts)
//! - Explicit no-match rather than silent default

use std::collections::BTreeMap;

use crate::config::RouteConfig;
use crate::routing::matcher::{PatternError, RoutePattern};

/// Result of matching a path against the routing table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Name of the matched route, `None` when the path is not routed.
    pub route: Option<String>,

    /// Raw route parameters keyed by name.
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// A path that matched no route.
    pub fn unrouted() -> Self {
        Self::default()
    }

    pub fn is_routed(&self) -> bool {
        self.route.is_some()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Anything that can match a site-relative path to a route.
pub trait RouteTable: Send + Sync {
    /// Match a path with leading/trailing slashes already removed.
    fn match_path(&self, path: &str) -> RouteMatch;
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    name: String,
    pattern: RoutePattern,
}

/// Compiled, immutable routing table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile routes from configuration.
    ///
    /// Routes are ordered by priority (higher first); ties keep
    /// declaration order.
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, PatternError> {
        let mut indexed: Vec<(usize, &RouteConfig)> = configs.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| b.priority.cmp(&a.priority).then(ia.cmp(ib)));

        let mut routes = Vec::with_capacity(indexed.len());
        for (_, config) in indexed {
            routes.push(CompiledRoute {
                name: config.name.clone(),
                pattern: RoutePattern::parse(&config.path)?,
            });
        }

        Ok(Self { routes })
    }

    /// Build the path of a named route, if it exists and all parameters are supplied.
    pub fn path_for(&self, name: &str, params: &BTreeMap<String, String>) -> Option<String> {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.pattern.fill(params))
    }

    /// Returns the pattern registered under `name`.
    pub fn pattern(&self, name: &str) -> Option<&RoutePattern> {
        self.routes.iter().find(|r| r.name == name).map(|r| &r.pattern)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteTable for Router {
    fn match_path(&self, path: &str) -> RouteMatch {
        for route in &self.routes {
            if let Some(params) = route.pattern.matches(path) {
                return RouteMatch {
                    route: Some(route.name.clone()),
                    params,
                };
            }
        }
        RouteMatch::unrouted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, path: &str, priority: u32) -> RouteConfig {
        RouteConfig {
            name: name.to_string(),
            path: path.to_string(),
            priority,
        }
    }

    #[test]
    fn test_first_match_by_priority() {
        let router = Router::from_config(&[
            route("generic", "/rdf_entity/{rdf_entity}", 0),
            route("special", "/rdf_entity/{other}", 10),
        ])
        .unwrap();

        let m = router.match_path("rdf_entity/abc");
        assert_eq!(m.route.as_deref(), Some("special"));
        assert_eq!(m.param("other"), Some("abc"));
        assert_eq!(m.param("rdf_entity"), None);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let router = Router::from_config(&[
            route("first", "/x/{a}", 0),
            route("second", "/x/{b}", 0),
        ])
        .unwrap();
        assert_eq!(router.match_path("x/1").route.as_deref(), Some("first"));
    }

    #[test]
    fn test_unrouted() {
        let router = Router::from_config(&[route("r", "/rdf_entity/{rdf_entity}", 0)]).unwrap();
        let m = router.match_path("some/random/path");
        assert!(!m.is_routed());
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_invalid_route_fails_compilation() {
        assert!(Router::from_config(&[route("bad", "/a/{", 0)]).is_err());
    }

    #[test]
    fn test_path_for() {
        let router = Router::from_config(&[route("canonical", "/rdf_entity/{rdf_entity}", 0)]).unwrap();
        let mut params = BTreeMap::new();
        params.insert("rdf_entity".to_string(), "abc".to_string());
        assert_eq!(router.path_for("canonical", &params).as_deref(), Some("/rdf_entity/abc"));
        assert!(router.path_for("missing", &params).is_none());
    }
}
