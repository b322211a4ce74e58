//! Identifier-or-URL resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::identifier::{Identifier, IdentifierCodec};
use crate::resolver::classifier::{classify, InputKind, Site};
use crate::routing::RouteTable;
use crate::store::IdentifierLookup;

/// Why an input could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// An external URL that is not a known identifier.
    NotAnIdentifier,
    /// A path that is not an entity URL (unrouted, no entity parameter, bad encoding).
    NotAnEntityUrl,
    /// A collaborator did not answer within the deadline.
    TimedOut,
}

impl UnresolvedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnresolvedReason::NotAnIdentifier => "not a valid identifier or URL",
            UnresolvedReason::NotAnEntityUrl => "neither a valid identifier nor a URL",
            UnresolvedReason::TimedOut => "lookup timed out",
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one resolution attempt. Exactly one variant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The input itself is an existing identifier.
    ResolvedAsIdentifier(Identifier),
    /// The input is an entity URL; this is the decoded identifier.
    ResolvedAsUrl(Identifier),
    Unresolved(UnresolvedReason),
}

impl ResolutionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::ResolvedAsIdentifier(_) => "identifier",
            ResolutionOutcome::ResolvedAsUrl(_) => "url",
            ResolutionOutcome::Unresolved(_) => "unresolved",
        }
    }
}

/// Resolves user input to an entity identifier.
///
/// Holds only read-only collaborators, so a single instance can be shared
/// across requests.
#[derive(Clone)]
pub struct Resolver {
    site: Site,
    entity_parameter: String,
    lookup: Arc<dyn IdentifierLookup>,
    routes: Arc<dyn RouteTable>,
    codec: Arc<dyn IdentifierCodec>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("site", &self.site.base_url().as_str())
            .field("entity_parameter", &self.entity_parameter)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(
        site: Site,
        entity_parameter: impl Into<String>,
        lookup: Arc<dyn IdentifierLookup>,
        routes: Arc<dyn RouteTable>,
        codec: Arc<dyn IdentifierCodec>,
    ) -> Self {
        Self {
            site,
            entity_parameter: entity_parameter.into(),
            lookup,
            routes,
            codec,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn codec(&self) -> &Arc<dyn IdentifierCodec> {
        &self.codec
    }

    /// Resolve raw user input.
    pub fn resolve(&self, input: &str) -> ResolutionOutcome {
        let input = input.trim();
        let kind = classify(input, &self.site);

        match kind {
            InputKind::ExternalUrl(_) => self.resolve_identifier(input),
            // Same-site URLs are entity URLs or nothing.
            InputKind::LocalUrl { path } => match self.resolve_path(&path) {
                Some(id) => ResolutionOutcome::ResolvedAsUrl(id),
                None => ResolutionOutcome::Unresolved(UnresolvedReason::NotAnEntityUrl),
            },
            InputKind::RelativePath { path } => match self.resolve_path(&path) {
                Some(id) => ResolutionOutcome::ResolvedAsUrl(id),
                // Identifiers that are not URLs (e.g. "abc123") are only known
                // once the path interpretation has failed.
                None if self.lookup.exists(input) => match Identifier::new(input) {
                    Ok(id) => ResolutionOutcome::ResolvedAsIdentifier(id),
                    Err(_) => ResolutionOutcome::Unresolved(UnresolvedReason::NotAnEntityUrl),
                },
                None => ResolutionOutcome::Unresolved(UnresolvedReason::NotAnEntityUrl),
            },
        }
    }

    fn resolve_identifier(&self, candidate: &str) -> ResolutionOutcome {
        if self.lookup.exists(candidate) {
            if let Ok(id) = Identifier::new(candidate) {
                return ResolutionOutcome::ResolvedAsIdentifier(id);
            }
        }
        ResolutionOutcome::Unresolved(UnresolvedReason::NotAnIdentifier)
    }

    fn resolve_path(&self, path: &str) -> Option<Identifier> {
        let trimmed = path.trim_matches('/');
        let matched = self.routes.match_path(trimmed);
        if !matched.is_routed() {
            tracing::trace!(path = %trimmed, "Path is not routed");
            return None;
        }

        let raw = matched.param(&self.entity_parameter).filter(|v| !v.is_empty())?;
        match self.codec.decode(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!(path = %trimmed, error = %e, "Entity parameter failed to decode");
                None
            }
        }
    }
}
