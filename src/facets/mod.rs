//! Arbitrary facets for the search backend.
//!
//! # Data Flow
//! ```text
//! [facets.<plugin>.<item>] in config
//!     → FacetRegistry (plugin id → FacetDefinition)
//!
//! Search request with facet settings + active items
//!     → query.rs FacetQuery::execute  (options + condition group on SearchQuery)
//!     → [search backend runs the query; out of scope]
//!     → query.rs FacetQuery::build     (raw counts → labelled FacetResult list)
//! ```
//!
//! # Design Decisions
//! - An arbitrary facet item is a named filter, not a field value
//! - Unknown active items are a hard error; unknown result filters are skipped

pub mod query;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::FacetItemConfig;

pub use query::{
    ArbitraryFacetOptions, Condition, ConditionGroup, FacetQuery, FacetResult, FacetSettings,
    QueryOperator, RawFacetResult, SearchQuery,
};

/// Errors raised while building facet queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacetError {
    #[error("Unknown active item: {0}")]
    UnknownActiveItem(String),

    #[error("Unknown arbitrary facet plugin: {0}")]
    UnknownPlugin(String),
}

/// Filter and label for one facet item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetItem {
    pub label: String,
    pub field_name: String,
    pub field_condition: String,
    pub field_operator: Option<String>,
}

impl From<&FacetItemConfig> for FacetItem {
    fn from(config: &FacetItemConfig) -> Self {
        Self {
            label: config.label.clone(),
            field_name: config.field_name.clone(),
            field_condition: config.field_condition.clone(),
            field_operator: config.field_operator.clone(),
        }
    }
}

/// All items of one arbitrary facet, keyed by item key.
pub type FacetDefinition = BTreeMap<String, FacetItem>;

/// Arbitrary facet definitions keyed by plugin id.
#[derive(Debug, Clone, Default)]
pub struct FacetRegistry {
    plugins: BTreeMap<String, FacetDefinition>,
}

impl FacetRegistry {
    pub fn from_config(config: &BTreeMap<String, BTreeMap<String, FacetItemConfig>>) -> Self {
        let plugins = config
            .iter()
            .map(|(plugin, items)| {
                let definition = items
                    .iter()
                    .map(|(key, item)| (key.clone(), FacetItem::from(item)))
                    .collect();
                (plugin.clone(), definition)
            })
            .collect();
        Self { plugins }
    }

    pub fn register(&mut self, plugin: impl Into<String>, definition: FacetDefinition) {
        self.plugins.insert(plugin.into(), definition);
    }

    pub fn definition(&self, plugin: &str) -> Result<&FacetDefinition, FacetError> {
        self.plugins
            .get(plugin)
            .ok_or_else(|| FacetError::UnknownPlugin(plugin.to_string()))
    }
}
