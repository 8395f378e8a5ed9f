//! Declarative table configuration.
//!
//! A [`TableConfig`] parameterizes the query engine and the filter bar for one
//! resource screen. Build it in code with [`TableConfig::builder`], or load it
//! from a JSON [`TableConfigDocument`] resolved against a
//! [`PredicateRegistry`](crate::query::PredicateRegistry).

mod document;

pub use document::FilterDocument;
pub use document::TableConfigDocument;

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::query::FilterDescriptor;
use crate::query::Predicate;
use crate::query::SortConfig;
use crate::query::SortOption;

/// Filters, sort options and search settings for one list screen.
///
/// # Example
///
/// ```
/// use listview_lib::config::TableConfig;
/// use listview_lib::query::{FilterDescriptor, SortConfig};
///
/// let config = TableConfig::builder()
///     .filter(FilterDescriptor::search("search", "Search").with_placeholder("Search posts..."))
///     .filter(FilterDescriptor::boolean("is_featured", "Featured"))
///     .sort_option("created_at", "Created")
///     .sort_option("title", "Title")
///     .default_sort(SortConfig::desc("created_at"))
///     .search_fields(["title", "excerpt"])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.filters().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    filters: Vec<FilterDescriptor>,
    sort_options: Vec<SortOption>,
    default_sort: Option<SortConfig>,
    search_fields: Option<Vec<String>>,
    custom_search: Option<Predicate>,
}

impl TableConfig {
    /// Starts building a configuration.
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// Returns the filter descriptors in declaration order.
    pub fn filters(&self) -> &[FilterDescriptor] {
        &self.filters
    }

    /// Looks up a filter descriptor by key.
    pub fn filter(&self, key: &str) -> Option<&FilterDescriptor> {
        self.filters.iter().find(|f| f.key() == key)
    }

    /// Returns the sortable fields offered by the sort selector.
    pub fn sort_options(&self) -> &[SortOption] {
        &self.sort_options
    }

    /// Returns the sort the engine starts with, if configured.
    pub fn default_sort(&self) -> Option<&SortConfig> {
        self.default_sort.as_ref()
    }

    /// Returns the fields searched by `search` filters, if configured.
    pub fn search_fields(&self) -> Option<&[String]> {
        self.search_fields.as_deref()
    }

    /// Returns the predicate replacing field search, if configured.
    pub fn custom_search(&self) -> Option<&Predicate> {
        self.custom_search.as_ref()
    }
}

/// Builder for [`TableConfig`].
#[derive(Debug, Default)]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    /// Appends a filter descriptor.
    pub fn filter(mut self, filter: FilterDescriptor) -> Self {
        self.config.filters.push(filter);
        self
    }

    /// Appends several filter descriptors.
    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterDescriptor>) -> Self {
        self.config.filters.extend(filters);
        self
    }

    /// Appends a sort option.
    pub fn sort_option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.config.sort_options.push(SortOption::new(key, label));
        self
    }

    /// Sets the initial sort.
    pub fn default_sort(mut self, sort: SortConfig) -> Self {
        self.config.default_sort = Some(sort);
        self
    }

    /// Sets the fields searched by `search` filters.
    pub fn search_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces field search with a predicate.
    pub fn custom_search(mut self, predicate: Predicate) -> Self {
        self.config.custom_search = Some(predicate);
        self
    }

    /// Validates and returns the configuration.
    ///
    /// Fails on empty or duplicate filter keys. A default sort on a field
    /// that is not among the sort options is allowed but logged.
    pub fn build(self) -> Result<TableConfig, ConfigError> {
        let config = self.config;

        let mut seen = HashSet::new();
        for filter in &config.filters {
            if filter.key().is_empty() {
                return Err(ConfigError::EmptyFilterKey {
                    label: filter.label().to_string(),
                });
            }
            if !seen.insert(filter.key()) {
                return Err(ConfigError::DuplicateFilterKey(filter.key().to_string()));
            }
        }

        if let Some(sort) = &config.default_sort {
            let offered = config.sort_options.iter().any(|o| o.key == sort.key);
            if !config.sort_options.is_empty() && !offered {
                log::warn!(
                    "default sort '{}' is not one of the configured sort options",
                    sort.key
                );
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_filter_key() {
        let result = TableConfig::builder()
            .filter(FilterDescriptor::search("status", "Search"))
            .filter(FilterDescriptor::select("status", "Status", []))
            .build();
        assert!(matches!(result, Err(ConfigError::DuplicateFilterKey(key)) if key == "status"));
    }

    #[test]
    fn test_empty_filter_key() {
        let result = TableConfig::builder()
            .filter(FilterDescriptor::search("", "Search"))
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyFilterKey { .. })));
    }

    #[test]
    fn test_default_sort_outside_options_is_allowed() {
        let config = TableConfig::builder()
            .sort_option("title", "Title")
            .default_sort(SortConfig::desc("created_at"))
            .build()
            .unwrap();
        assert_eq!(config.default_sort(), Some(&SortConfig::desc("created_at")));
    }

    #[test]
    fn test_filter_lookup() {
        let config = TableConfig::builder()
            .filter(FilterDescriptor::boolean("is_active", "Active"))
            .build()
            .unwrap();
        assert!(config.filter("is_active").is_some());
        assert!(config.filter("missing").is_none());
        assert!(config.search_fields().is_none());
    }
}
