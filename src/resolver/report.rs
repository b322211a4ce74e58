//! Turning a resolution outcome into something the caller can act on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::identifier::{Identifier, IdentifierCodec};
use crate::resolver::classifier::Site;
use crate::resolver::engine::{ResolutionOutcome, UnresolvedReason};
use crate::routing::Router;

/// Name of the single form field.
pub const INPUT_FIELD: &str = "rdf_entity_id";

/// Instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// Send the user to the entity's canonical page.
    Redirect { location: String },
    /// Show the decoded identifier on its own, so it can be selected and copied.
    Display { text: String },
    /// Attach an error message to the input field.
    FieldError { field: String, message: String },
}

/// Builds reports, including canonical entity locations.
#[derive(Clone)]
pub struct Reporter {
    site: Site,
    router: Arc<Router>,
    canonical_route: String,
    entity_parameter: String,
    codec: Arc<dyn IdentifierCodec>,
}

impl Reporter {
    pub fn new(
        site: Site,
        router: Arc<Router>,
        canonical_route: impl Into<String>,
        entity_parameter: impl Into<String>,
        codec: Arc<dyn IdentifierCodec>,
    ) -> Self {
        Self {
            site,
            router,
            canonical_route: canonical_route.into(),
            entity_parameter: entity_parameter.into(),
            codec,
        }
    }

    /// Absolute canonical display URL for an identifier.
    pub fn canonical_url(&self, id: &Identifier) -> Option<String> {
        let mut params = BTreeMap::new();
        params.insert(
            self.entity_parameter.clone(),
            self.codec.encode(id).as_str().to_string(),
        );
        self.router
            .path_for(&self.canonical_route, &params)
            .map(|path| self.site.absolute(&path))
    }

    /// Report on the outcome of resolving `input`.
    pub fn report(&self, input: &str, outcome: &ResolutionOutcome) -> Report {
        match outcome {
            ResolutionOutcome::ResolvedAsIdentifier(id) => match self.canonical_url(id) {
                Some(location) => Report::Redirect { location },
                None => {
                    tracing::error!(route = %self.canonical_route, "Canonical route cannot be built");
                    field_error(format!("Not a valid RDF ID: {}.", input.trim()))
                }
            },
            ResolutionOutcome::ResolvedAsUrl(id) => Report::Display {
                text: id.as_str().to_string(),
            },
            ResolutionOutcome::Unresolved(reason) => field_error(unresolved_message(input.trim(), *reason)),
        }
    }
}

fn field_error(message: String) -> Report {
    Report::FieldError {
        field: INPUT_FIELD.to_string(),
        message,
    }
}

fn unresolved_message(input: &str, reason: UnresolvedReason) -> String {
    match reason {
        UnresolvedReason::NotAnIdentifier => format!("Not a valid RDF ID: {}.", input),
        UnresolvedReason::NotAnEntityUrl => format!(
            "The entered value ({}) is neither a valid RDF entity ID, nor a RDF entity URL.",
            input
        ),
        UnresolvedReason::TimedOut => format!(
            "The entered value ({}) could not be checked in time. Please try again.",
            input
        ),
    }
}
