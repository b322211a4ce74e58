//! Workflow transition guards.
//!
//! # Data Flow
//! ```text
//! [workflow.<bundle>.transitions.<to>] <from> = [roles]   (config)
//!     → TransitionGuard::for_bundle
//!     → allowed(from, to, user roles) / allowed_targets(from, user roles)
//! ```
//!
//! # Design Decisions
//! - Guards are built from settings, one per bundle
//! - A bundle without settings allows nothing
//! - Any one matching role is enough

use std::collections::BTreeMap;

use crate::config::WorkflowConfig;

/// Target state → source state → allowed roles.
pub type TransitionTable = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Decides whether a user may move an entity between workflow states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionGuard {
    transitions: TransitionTable,
}

impl TransitionGuard {
    pub fn new(transitions: TransitionTable) -> Self {
        Self { transitions }
    }

    /// Guard for `bundle`, loaded from its settings section.
    pub fn for_bundle(workflow: &BTreeMap<String, WorkflowConfig>, bundle: &str) -> Self {
        match workflow.get(bundle) {
            Some(settings) => Self::new(settings.transitions.clone()),
            None => {
                tracing::debug!(bundle = %bundle, "No workflow settings, all transitions denied");
                Self::default()
            }
        }
    }

    pub fn allowed<S: AsRef<str>>(&self, from: &str, to: &str, roles: &[S]) -> bool {
        self.transitions
            .get(to)
            .and_then(|sources| sources.get(from))
            .map(|allowed| roles.iter().any(|r| allowed.iter().any(|a| a == r.as_ref())))
            .unwrap_or(false)
    }

    /// States reachable from `from` with the given roles, in name order.
    pub fn allowed_targets<S: AsRef<str>>(&self, from: &str, roles: &[S]) -> Vec<&str> {
        self.transitions
            .keys()
            .filter(|to| self.allowed(from, to, roles))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow() -> BTreeMap<String, WorkflowConfig> {
        let raw = r#"
            [event.transitions.validated]
            draft = ["facilitator", "moderator"]
            proposed = ["moderator"]

            [event.transitions.proposed]
            draft = ["authenticated"]
        "#;
        toml::from_str(raw).unwrap()
    }

    #[test]
    fn test_allowed_by_any_role() {
        let guard = TransitionGuard::for_bundle(&workflow(), "event");
        assert!(guard.allowed("draft", "validated", &["authenticated", "facilitator"]));
        assert!(!guard.allowed("proposed", "validated", &["facilitator"]));
        assert!(guard.allowed("proposed", "validated", &["moderator"]));
        assert!(!guard.allowed("validated", "draft", &["moderator"]));
    }

    #[test]
    fn test_allowed_targets() {
        let guard = TransitionGuard::for_bundle(&workflow(), "event");
        assert_eq!(guard.allowed_targets("draft", &["authenticated"]), vec!["proposed"]);
        assert_eq!(
            guard.allowed_targets("draft", &["authenticated", "moderator"]),
            vec!["proposed", "validated"]
        );
    }

    #[test]
    fn test_unknown_bundle_denies() {
        let guard = TransitionGuard::for_bundle(&workflow(), "news");
        let roles: [&str; 1] = ["moderator"];
        assert!(!guard.allowed("draft", "validated", &roles));
        assert!(guard.allowed_targets("draft", &roles).is_empty());
    }
}
