//! JSON form of a table configuration.
//!
//! ```json
//! {
//!   "filters": [
//!     { "key": "search", "label": "Search", "type": "search", "placeholder": "Search posts..." },
//!     { "key": "status", "label": "Status", "type": "custom", "predicate": "post_status",
//!       "options": [{ "value": "all", "label": "All" }, { "value": "draft", "label": "Draft" }],
//!       "defaultValue": "all" }
//!   ],
//!   "sortOptions": [{ "key": "created_at", "label": "Created" }],
//!   "defaultSort": { "key": "created_at", "direction": "desc" },
//!   "searchFields": ["title", "excerpt"]
//! }
//! ```
//!
//! Closures cannot be written in JSON, so custom filters and custom search
//! name a predicate registered in a [`PredicateRegistry`].

use serde::Deserialize;
use serde::Serialize;

use super::TableConfig;
use crate::error::ConfigError;
use crate::query::FilterDescriptor;
use crate::query::FilterKind;
use crate::query::FilterOption;
use crate::query::PredicateRegistry;
use crate::query::SortConfig;
use crate::query::SortOption;

/// Serialized table configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfigDocument {
    #[serde(default)]
    pub filters: Vec<FilterDocument>,
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    #[serde(default)]
    pub default_sort: Option<SortConfig>,
    #[serde(default)]
    pub search_fields: Option<Vec<String>>,
    /// Registry name of a predicate replacing field search.
    #[serde(default)]
    pub custom_search: Option<String>,
}

/// Serialized filter descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDocument {
    pub key: String,
    pub label: String,
    /// One of `search`, `select`, `boolean`, `date`, `custom`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Registry name of the matching predicate. Required for `custom`.
    #[serde(default)]
    pub predicate: Option<String>,
}

impl TableConfigDocument {
    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves predicate names and builds the configuration.
    ///
    /// Filters with an unrecognized `type` are skipped with a warning, so they
    /// neither filter nor render.
    pub fn resolve(self, registry: &PredicateRegistry) -> Result<TableConfig, ConfigError> {
        let mut builder = TableConfig::builder();

        for doc in self.filters {
            if let Some(filter) = doc.resolve(registry)? {
                builder = builder.filter(filter);
            }
        }

        for option in self.sort_options {
            builder = builder.sort_option(option.key, option.label);
        }
        if let Some(sort) = self.default_sort {
            builder = builder.default_sort(sort);
        }
        if let Some(fields) = self.search_fields {
            builder = builder.search_fields(fields);
        }
        if let Some(name) = self.custom_search {
            let predicate = registry
                .get(&name)
                .ok_or_else(|| ConfigError::UnknownSearch(name.clone()))?;
            builder = builder.custom_search(predicate.clone());
        }

        builder.build()
    }
}

impl FilterDocument {
    fn resolve(self, registry: &PredicateRegistry) -> Result<Option<FilterDescriptor>, ConfigError> {
        let predicate = match &self.predicate {
            Some(name) => Some(registry.get(name).cloned().ok_or_else(|| {
                ConfigError::UnknownPredicate {
                    filter: self.key.clone(),
                    name: name.clone(),
                }
            })?),
            None => None,
        };

        let kind = match self.kind.as_str() {
            "search" => FilterKind::Search,
            "select" => FilterKind::Select,
            "boolean" => FilterKind::Boolean,
            "date" => FilterKind::Date,
            "custom" => match &predicate {
                Some(p) => FilterKind::Custom(p.clone()),
                None => return Err(ConfigError::MissingPredicate { filter: self.key }),
            },
            other => {
                log::warn!("skipping filter '{}' with unknown type '{}'", self.key, other);
                return Ok(None);
            }
        };
        let is_custom = matches!(kind, FilterKind::Custom(_));

        let mut filter = FilterDescriptor::new(self.key, self.label, kind).with_options(self.options);
        if let Some(value) = self.default_value {
            filter = filter.with_default(value);
        }
        if let Some(placeholder) = self.placeholder {
            filter = filter.with_placeholder(placeholder);
        }
        if let Some(p) = predicate.filter(|_| !is_custom) {
            filter = filter.with_predicate(p);
        }
        Ok(Some(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::query::Predicate;

    fn registry() -> PredicateRegistry {
        PredicateRegistry::new().with(
            "draft",
            Predicate::new(|record: &Record, value: &str| {
                value == "all" || record.is_falsy("published_at")
            }),
        )
    }

    #[test]
    fn test_resolve_document() {
        let json = r#"{
            "filters": [
                { "key": "search", "label": "Search", "type": "search", "placeholder": "Find..." },
                { "key": "status", "label": "Status", "type": "custom", "predicate": "draft",
                  "options": [{ "value": "all", "label": "All" }], "defaultValue": "all" }
            ],
            "sortOptions": [{ "key": "title", "label": "Title" }],
            "defaultSort": { "key": "title", "direction": "asc" },
            "searchFields": ["title"]
        }"#;

        let config = TableConfigDocument::from_json(json)
            .unwrap()
            .resolve(&registry())
            .unwrap();

        assert_eq!(config.filters().len(), 2);
        assert_eq!(config.filters()[0].placeholder(), Some("Find..."));
        assert_eq!(config.filters()[1].kind().tag(), "custom");
        assert_eq!(config.filters()[1].default_value(), Some("all"));
        assert_eq!(config.default_sort(), Some(&SortConfig::asc("title")));
        assert_eq!(config.search_fields(), Some(&["title".to_string()][..]));
    }

    #[test]
    fn test_custom_without_predicate() {
        let json = r#"{ "filters": [{ "key": "status", "label": "Status", "type": "custom" }] }"#;
        let result = TableConfigDocument::from_json(json).unwrap().resolve(&registry());
        assert!(matches!(result, Err(ConfigError::MissingPredicate { filter }) if filter == "status"));
    }

    #[test]
    fn test_unknown_predicate() {
        let json = r#"{ "filters": [{ "key": "status", "label": "Status", "type": "select", "predicate": "nope" }] }"#;
        let result = TableConfigDocument::from_json(json).unwrap().resolve(&registry());
        assert!(matches!(result, Err(ConfigError::UnknownPredicate { name, .. }) if name == "nope"));
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let json = r#"{ "filters": [{ "key": "range", "label": "Range", "type": "slider" }] }"#;
        let config = TableConfigDocument::from_json(json)
            .unwrap()
            .resolve(&registry())
            .unwrap();
        assert!(config.filters().is_empty());
    }

    #[test]
    fn test_predicate_on_builtin_kind_overrides() {
        let json = r#"{ "filters": [{ "key": "status", "label": "Status", "type": "select", "predicate": "draft" }] }"#;
        let config = TableConfigDocument::from_json(json)
            .unwrap()
            .resolve(&registry())
            .unwrap();
        assert_eq!(config.filters()[0].kind().tag(), "select");
        assert!(config.filters()[0].delegate().is_some());
    }

    #[test]
    fn test_unknown_custom_search() {
        let json = r#"{ "customSearch": "fuzzy" }"#;
        let result = TableConfigDocument::from_json(json).unwrap().resolve(&registry());
        assert!(matches!(result, Err(ConfigError::UnknownSearch(name)) if name == "fuzzy"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TableConfigDocument::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
