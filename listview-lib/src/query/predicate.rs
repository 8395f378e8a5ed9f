//! Built-in matching rules and the named predicate registry.
//!
//! | Kind      | Rule |
//! |-----------|------|
//! | `search`  | custom search, else any search field contains the value (case-insensitive), else the filter's own field |
//! | `select`  | `"all"` matches; otherwise the field is a string equal to the value |
//! | `boolean` | the field is a bool equal to `value == "true"` |
//! | `date`    | always matches |
//! | `custom`  | the descriptor's predicate |
//!
//! A descriptor that carries a predicate of its own skips the built-in rule.

use std::collections::HashMap;

use super::FilterDescriptor;
use super::FilterKind;
use super::Predicate;
use crate::config::TableConfig;
use crate::model::Record;
use crate::model::Value;

/// Select value that disables a select filter.
pub const SELECT_ALL: &str = "all";

/// Returns `true` if `record` passes `filter` for the given non-empty value.
pub fn matches(filter: &FilterDescriptor, config: &TableConfig, record: &Record, value: &str) -> bool {
    if let Some(predicate) = filter.delegate() {
        return predicate.matches(record, value);
    }

    match filter.kind() {
        FilterKind::Search => search_matches(filter.key(), config, record, value),
        FilterKind::Select => select_matches(record.get(filter.key()), value),
        FilterKind::Boolean => boolean_matches(record.get(filter.key()), value),
        FilterKind::Date => date_matches(record.get(filter.key()), value),
        // delegate() always yields the predicate of a custom filter
        FilterKind::Custom(predicate) => predicate.matches(record, value),
    }
}

fn search_matches(key: &str, config: &TableConfig, record: &Record, value: &str) -> bool {
    if let Some(custom) = config.custom_search() {
        return custom.matches(record, value);
    }

    let needle = value.to_lowercase();
    match config.search_fields() {
        Some(fields) => fields
            .iter()
            .any(|field| contains_ignore_case(record.get(field), &needle)),
        None => contains_ignore_case(record.get(key), &needle),
    }
}

/// Substring test against the value's display form. Absent values never match.
fn contains_ignore_case(field: Option<&Value>, needle: &str) -> bool {
    match field {
        None | Some(Value::Null) => false,
        Some(v) => v.to_string().to_lowercase().contains(needle),
    }
}

fn select_matches(field: Option<&Value>, value: &str) -> bool {
    value == SELECT_ALL || field.and_then(Value::as_str) == Some(value)
}

fn boolean_matches(field: Option<&Value>, value: &str) -> bool {
    matches!(field, Some(Value::Bool(b)) if *b == (value == "true"))
}

// TODO: compare against a from/to range once the filter bar emits one
fn date_matches(_field: Option<&Value>, _value: &str) -> bool {
    true
}

/// Named predicates that configuration documents can reference.
///
/// Configurations built in code attach closures directly; configurations
/// loaded from JSON name their custom filters and custom search instead, and
/// the names are resolved here when the document is loaded.
///
/// # Example
///
/// ```
/// use listview_lib::query::{Predicate, PredicateRegistry};
///
/// let registry = PredicateRegistry::new()
///     .with("has_avatar", Predicate::new(|record, _| !record.is_falsy("avatar_url")));
///
/// assert!(registry.get("has_avatar").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PredicateRegistry {
    predicates: HashMap<String, Predicate>,
}

impl PredicateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a predicate (builder pattern).
    pub fn with(mut self, name: impl Into<String>, predicate: Predicate) -> Self {
        self.register(name, predicate);
        self
    }

    /// Registers a predicate, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, predicate: Predicate) {
        self.predicates.insert(name.into(), predicate);
    }

    /// Looks up a predicate by name.
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TableConfig {
        TableConfig::builder().build().unwrap()
    }

    #[test]
    fn test_select_all_matches_anything() {
        let filter = FilterDescriptor::select("category", "Category", []);
        let cfg = config();
        assert!(matches(&filter, &cfg, &Record::new(), "all"));
        assert!(matches(
            &filter,
            &cfg,
            &Record::new().set("category", "news"),
            "all"
        ));
    }

    #[test]
    fn test_select_is_strict_string_equality() {
        let filter = FilterDescriptor::select("position", "Position", []);
        let cfg = config();
        assert!(matches(&filter, &cfg, &Record::new().set("position", "hero"), "hero"));
        assert!(!matches(&filter, &cfg, &Record::new().set("position", "Hero"), "hero"));
        // a number is never strictly equal to the string form of the filter value
        assert!(!matches(&filter, &cfg, &Record::new().set("position", 1i64), "1"));
    }

    #[test]
    fn test_boolean_converts_value() {
        let filter = FilterDescriptor::boolean("is_active", "Active");
        let cfg = config();
        assert!(matches(&filter, &cfg, &Record::new().set("is_active", true), "true"));
        assert!(!matches(&filter, &cfg, &Record::new().set("is_active", "true"), "true"));
        assert!(matches(&filter, &cfg, &Record::new().set("is_active", false), "false"));
        assert!(!matches(&filter, &cfg, &Record::new(), "false"));
    }

    #[test]
    fn test_date_passes_through() {
        let filter = FilterDescriptor::date("created_at", "Created");
        assert!(matches(&filter, &config(), &Record::new(), "2024-01-01"));
    }

    #[test]
    fn test_search_falls_back_to_own_field() {
        let filter = FilterDescriptor::search("name", "Name");
        let cfg = config();
        assert!(matches(&filter, &cfg, &Record::new().set("name", "Jane Doe"), "DOE"));
        assert!(!matches(&filter, &cfg, &Record::new().set("email", "doe@x.io"), "doe"));
    }

    #[test]
    fn test_search_uses_display_form_of_numbers() {
        let filter = FilterDescriptor::search("phone", "Phone");
        let record = Record::new().set("phone", 5550123i64);
        assert!(matches(&filter, &config(), &record, "0123"));
    }

    #[test]
    fn test_search_prefers_custom_search() {
        let cfg = TableConfig::builder()
            .search_fields(["title"])
            .custom_search(Predicate::new(|record, value| {
                record.get_string("slug").ok().flatten() == Some(value)
            }))
            .build()
            .unwrap();
        let filter = FilterDescriptor::search("search", "Search");
        let record = Record::new().set("title", "hello").set("slug", "hello-world");

        assert!(!matches(&filter, &cfg, &record, "hello"));
        assert!(matches(&filter, &cfg, &record, "hello-world"));
    }

    #[test]
    fn test_empty_search_fields_match_nothing() {
        let cfg = TableConfig::builder()
            .search_fields(Vec::<String>::new())
            .build()
            .unwrap();
        let filter = FilterDescriptor::search("title", "Title");
        assert!(!matches(&filter, &cfg, &Record::new().set("title", "x"), "x"));
    }

    #[test]
    fn test_registry_names_sorted() {
        let registry = PredicateRegistry::new()
            .with("b", Predicate::new(|_, _| true))
            .with("a", Predicate::new(|_, _| true));
        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
