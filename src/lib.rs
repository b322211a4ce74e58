//! RDF entity URI resolver.
//!
//! Turns whatever a user pastes (an entity identifier, a canonical entity
//! URL on this site, or a site-relative path) into either a redirect to the
//! entity page or the decoded identifier.

// Core subsystems
pub mod config;
pub mod http;
pub mod identifier;
pub mod resolver;
pub mod routing;
pub mod store;

// Content rules
pub mod constraints;
pub mod facets;
pub mod migrate;
pub mod workflow;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ResolverConfig;
pub use http::HttpServer;
pub use identifier::{Identifier, IdentifierCodec, UrlSafeCodec};
pub use lifecycle::Shutdown;
pub use resolver::{Report, ResolutionOutcome, Resolver};
