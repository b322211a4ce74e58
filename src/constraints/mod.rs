//! Field constraints on entity references.
//!
//! # Responsibilities
//! - Check that every entity a news item is "shared in" has the same
//!   bundle as the news item's parent
//! - Report one violation per offending reference, addressed by delta
//!
//! # Design Decisions
//! - No items or no parent means nothing to check
//! - Messages use `%field_name` / `%label` placeholders, substituted here

use serde::{Deserialize, Serialize};

use crate::store::EntityRecord;

/// Default message for a "shared in" reference of the wrong bundle.
pub const SHARED_IN_MESSAGE: &str =
    "The %field_name field may only reference entities of the same type as the parent; %label does not.";

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Property path, here the delta of the offending item.
    pub path: String,
    pub message: String,
}

/// Validates the "shared in" references of a news item.
#[derive(Debug, Clone)]
pub struct SharedInValidator {
    message: String,
}

impl Default for SharedInValidator {
    fn default() -> Self {
        Self::new(SHARED_IN_MESSAGE)
    }
}

impl SharedInValidator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn validate(
        &self,
        field_label: &str,
        parent: Option<&EntityRecord>,
        items: &[EntityRecord],
    ) -> Vec<Violation> {
        let Some(parent) = parent else {
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.bundle != parent.bundle)
            .map(|(delta, item)| Violation {
                path: delta.to_string(),
                message: self
                    .message
                    .replace("%field_name", field_label)
                    .replace("%label", &item.label),
            })
            .collect()
    }
}
