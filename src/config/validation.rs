//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the site base URL is usable for locality decisions
//! - Check routes compile and the canonical route carries the entity parameter
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;
use url::Url;

use crate::config::schema::ResolverConfig;
use crate::routing::RoutePattern;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.base_url '{0}' is not an absolute http(s) URL with a host")]
    InvalidBaseUrl(String),

    #[error("site.entity_parameter must not be empty")]
    EmptyEntityParameter,

    #[error("route '{name}' is invalid: {reason}")]
    InvalidRoute { name: String, reason: String },

    #[error("route name '{0}' is declared more than once")]
    DuplicateRoute(String),

    #[error("canonical route '{0}' is not declared")]
    MissingCanonicalRoute(String),

    #[error("canonical route '{route}' does not declare parameter '{param}'")]
    CanonicalRouteWithoutParameter { route: String, param: String },

    #[error("entity #{0} has an empty id")]
    EmptyEntityId(usize),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.site.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.site.base_url.clone())),
    }

    let param = config.site.entity_parameter.as_str();
    if param.is_empty() {
        errors.push(ValidationError::EmptyEntityParameter);
    }

    let mut names = HashSet::new();
    let mut canonical = None;
    for route in &config.routes {
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
        match RoutePattern::parse(&route.path) {
            Ok(pattern) => {
                if route.name == config.site.canonical_route {
                    canonical = Some(pattern);
                }
            }
            Err(e) => errors.push(ValidationError::InvalidRoute {
                name: route.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    match canonical {
        Some(pattern) if !param.is_empty() && !pattern.has_param(param) => {
            errors.push(ValidationError::CanonicalRouteWithoutParameter {
                route: config.site.canonical_route.clone(),
                param: param.to_string(),
            });
        }
        Some(_) => {}
        None if !names.contains(config.site.canonical_route.as_str()) => {
            errors.push(ValidationError::MissingCanonicalRoute(
                config.site.canonical_route.clone(),
            ));
        }
        // Declared but failed to compile; already reported.
        None => {}
    }

    for (i, entity) in config.entities.iter().enumerate() {
        if entity.id.trim().is_empty() {
            errors.push(ValidationError::EmptyEntityId(i));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.resolve_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("resolve_ms"));
    }
    if config.timeouts.max_blocking_resolutions == 0 {
        errors.push(ValidationError::ZeroTimeout("max_blocking_resolutions"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
