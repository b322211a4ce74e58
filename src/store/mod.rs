//! Entity lookup store.
//!
//! # Data Flow
//! ```text
//! [[entities]] in config
//!     → EntityStore::from_config (seed)
//!     → IdentifierLookup::exists   (resolver, canonical page)
//!     → EntityStore::get           (constraint validation, display)
//! ```
//!
//! # Design Decisions
//! - Read-mostly concurrent map (DashMap); callers never hold guards
//! - Lookup is by exact identifier string, no normalisation

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::EntityConfig;

/// Answers whether an entity with a given identifier exists.
pub trait IdentifierLookup: Send + Sync {
    fn exists(&self, id: &str) -> bool;
}

/// Minimal view of a stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub bundle: String,
    pub label: String,
}

impl From<&EntityConfig> for EntityRecord {
    fn from(config: &EntityConfig) -> Self {
        Self {
            id: config.id.clone(),
            bundle: config.bundle.clone(),
            label: config.label.clone(),
        }
    }
}

/// A thread-safe in-memory entity store.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    inner: Arc<DashMap<String, EntityRecord>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded from configuration.
    pub fn from_config(entities: &[EntityConfig]) -> Self {
        let store = Self::new();
        for entity in entities {
            store.insert(EntityRecord::from(entity));
        }
        tracing::debug!(count = store.len(), "Entity store seeded");
        store
    }

    pub fn insert(&self, record: EntityRecord) {
        self.inner.insert(record.id.clone(), record);
    }

    pub fn remove(&self, id: &str) -> Option<EntityRecord> {
        self.inner.remove(id).map(|(_, record)| record)
    }

    pub fn get(&self, id: &str) -> Option<EntityRecord> {
        self.inner.get(id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl IdentifierLookup for EntityStore {
    fn exists(&self, id: &str) -> bool {
        self.inner.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_lookup() {
        let store = EntityStore::from_config(&[EntityConfig {
            id: "http://data.example.eu/w21/abc".to_string(),
            bundle: "solution".to_string(),
            label: "Solution ABC".to_string(),
        }]);

        assert!(store.exists("http://data.example.eu/w21/abc"));
        assert!(!store.exists("http://data.example.eu/w21/ABC"));
        assert_eq!(store.get("http://data.example.eu/w21/abc").unwrap().bundle, "solution");
    }

    #[test]
    fn test_insert_and_remove() {
        let store = EntityStore::new();
        store.insert(EntityRecord {
            id: "abc123".to_string(),
            bundle: "collection".to_string(),
            label: "ABC".to_string(),
        });
        assert_eq!(store.len(), 1);
        assert!(store.remove("abc123").is_some());
        assert!(store.is_empty());
        assert!(!store.exists("abc123"));
    }
}
