//! Query building and result translation for arbitrary facets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::facets::{FacetError, FacetRegistry};

/// How conditions of one facet combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryOperator {
    And,
    Or,
}

impl QueryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOperator::And => "and",
            QueryOperator::Or => "or",
        }
    }
}

/// Facet settings as configured on the facet and its widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetSettings {
    pub field_identifier: String,
    pub query_operator: QueryOperator,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub hard_limit: u32,
    #[serde(default)]
    pub min_count: u32,
    pub arbitrary_facet_plugin: String,
    #[serde(default)]
    pub active_items: Vec<String>,
}

/// Per-field options handed to the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitraryFacetOptions {
    pub limit: u32,
    pub operator: QueryOperator,
    pub min_count: u32,
    pub missing: bool,
    pub arbitrary_facet_plugin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub value: String,
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conjunction: QueryOperator,
    pub tags: Vec<String>,
    pub conditions: Vec<Condition>,
}

/// The parts of a search query that facets touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Arbitrary facet options keyed by field identifier.
    pub arbitrary_facets: BTreeMap<String, ArbitraryFacetOptions>,
    pub condition_groups: Vec<ConditionGroup>,
}

/// One bucket as returned by the backend; `filter` may still be quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFacetResult {
    pub filter: String,
    pub count: u64,
}

/// A labelled facet value ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetResult {
    pub raw_value: String,
    pub display_value: String,
    pub count: u64,
}

/// Query type for facets backed by arbitrary filter definitions.
pub struct FacetQuery<'a> {
    settings: &'a FacetSettings,
    registry: &'a FacetRegistry,
}

impl<'a> FacetQuery<'a> {
    pub fn new(settings: &'a FacetSettings, registry: &'a FacetRegistry) -> Self {
        Self { settings, registry }
    }

    /// Add facet options and, when items are active, the filter group.
    pub fn execute(&self, query: &mut SearchQuery) -> Result<(), FacetError> {
        let settings = self.settings;
        query.arbitrary_facets.insert(
            settings.field_identifier.clone(),
            ArbitraryFacetOptions {
                limit: settings.hard_limit,
                operator: settings.query_operator,
                min_count: settings.min_count,
                missing: false,
                arbitrary_facet_plugin: settings.arbitrary_facet_plugin.clone(),
            },
        );

        if settings.active_items.is_empty() {
            return Ok(());
        }

        let definition = self.registry.definition(&settings.arbitrary_facet_plugin)?;
        let default_operator = if settings.exclude { "<>" } else { "=" };

        let mut group = ConditionGroup {
            conjunction: settings.query_operator,
            tags: vec![format!("arbitrary:{}", settings.field_identifier)],
            conditions: Vec::with_capacity(settings.active_items.len()),
        };
        for active in &settings.active_items {
            let item = definition
                .get(active)
                .ok_or_else(|| FacetError::UnknownActiveItem(active.clone()))?;
            group.conditions.push(Condition {
                field: item.field_name.clone(),
                value: item.field_condition.clone(),
                operator: item
                    .field_operator
                    .clone()
                    .unwrap_or_else(|| default_operator.to_string()),
            });
        }
        query.condition_groups.push(group);

        Ok(())
    }

    /// Translate backend buckets into labelled results.
    pub fn build(&self, results: &[RawFacetResult]) -> Result<Vec<FacetResult>, FacetError> {
        let definition = self.registry.definition(&self.settings.arbitrary_facet_plugin)?;
        let keep_empty = self.settings.query_operator == QueryOperator::Or;

        let facet_results = results
            .iter()
            .filter_map(|result| {
                let key = result.filter.trim_matches('"');
                let item = definition.get(key)?;
                if result.count == 0 && !keep_empty {
                    return None;
                }
                Some(FacetResult {
                    raw_value: key.to_string(),
                    display_value: item.label.clone(),
                    count: result.count,
                })
            })
            .collect();

        Ok(facet_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::{FacetDefinition, FacetItem};

    fn registry() -> FacetRegistry {
        let mut definition = FacetDefinition::new();
        definition.insert(
            "solutions".to_string(),
            FacetItem {
                label: "Solutions".to_string(),
                field_name: "entity_bundle".to_string(),
                field_condition: "solution".to_string(),
                field_operator: None,
            },
        );
        definition.insert(
            "recent".to_string(),
            FacetItem {
                label: "Recently changed".to_string(),
                field_name: "changed".to_string(),
                field_condition: "1700000000".to_string(),
                field_operator: Some(">=".to_string()),
            },
        );
        let mut registry = FacetRegistry::default();
        registry.register("content_type", definition);
        registry
    }

    fn settings(operator: QueryOperator, active: &[&str]) -> FacetSettings {
        FacetSettings {
            field_identifier: "content".to_string(),
            query_operator: operator,
            exclude: false,
            hard_limit: 10,
            min_count: 1,
            arbitrary_facet_plugin: "content_type".to_string(),
            active_items: active.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_execute_without_active_items_sets_options_only() {
        let registry = registry();
        let settings = settings(QueryOperator::And, &[]);
        let mut query = SearchQuery::default();

        FacetQuery::new(&settings, &registry).execute(&mut query).unwrap();

        let options = &query.arbitrary_facets["content"];
        assert_eq!(options.limit, 10);
        assert!(!options.missing);
        assert_eq!(options.arbitrary_facet_plugin, "content_type");
        assert!(query.condition_groups.is_empty());
    }

    #[test]
    fn test_execute_adds_tagged_group() {
        let registry = registry();
        let settings = settings(QueryOperator::Or, &["solutions", "recent"]);
        let mut query = SearchQuery::default();

        FacetQuery::new(&settings, &registry).execute(&mut query).unwrap();

        let group = &query.condition_groups[0];
        assert_eq!(group.conjunction, QueryOperator::Or);
        assert_eq!(group.tags, vec!["arbitrary:content".to_string()]);
        assert_eq!(
            group.conditions,
            vec![
                Condition {
                    field: "entity_bundle".to_string(),
                    value: "solution".to_string(),
                    operator: "=".to_string(),
                },
                Condition {
                    field: "changed".to_string(),
                    value: "1700000000".to_string(),
                    operator: ">=".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_exclude_negates_every_default_operator() {
        let registry = registry();
        let mut settings = settings(QueryOperator::And, &["solutions", "solutions"]);
        settings.exclude = true;
        let mut query = SearchQuery::default();

        FacetQuery::new(&settings, &registry).execute(&mut query).unwrap();

        assert!(query.condition_groups[0]
            .conditions
            .iter()
            .all(|c| c.operator == "<>"));
    }

    #[test]
    fn test_unknown_active_item_fails() {
        let registry = registry();
        let settings = settings(QueryOperator::And, &["bogus"]);
        let mut query = SearchQuery::default();

        let err = FacetQuery::new(&settings, &registry).execute(&mut query).unwrap_err();
        assert_eq!(err, FacetError::UnknownActiveItem("bogus".to_string()));
        assert_eq!(err.to_string(), "Unknown active item: bogus");
    }

    #[test]
    fn test_build_filters_and_labels() {
        let registry = registry();
        let raw = vec![
            RawFacetResult { filter: "\"solutions\"".to_string(), count: 4 },
            RawFacetResult { filter: "recent".to_string(), count: 0 },
            RawFacetResult { filter: "unknown".to_string(), count: 9 },
        ];

        let and = settings(QueryOperator::And, &[]);
        let results = FacetQuery::new(&and, &registry).build(&raw).unwrap();
        assert_eq!(
            results,
            vec![FacetResult {
                raw_value: "solutions".to_string(),
                display_value: "Solutions".to_string(),
                count: 4,
            }]
        );

        // With OR, zero-count buckets stay selectable.
        let or = settings(QueryOperator::Or, &[]);
        let results = FacetQuery::new(&or, &registry).build(&raw).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].display_value, "Recently changed");
    }

    #[test]
    fn test_unknown_plugin() {
        let registry = FacetRegistry::default();
        let settings = settings(QueryOperator::And, &[]);
        assert!(matches!(
            FacetQuery::new(&settings, &registry).build(&[]),
            Err(FacetError::UnknownPlugin(_))
        ));
    }
}
