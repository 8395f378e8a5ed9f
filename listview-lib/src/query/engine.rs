//! The table query engine.
//!
//! [`TableQuery`] owns the filter state, the sort state and the current page
//! of one list screen. Every mutation recomputes the filtered and sorted view
//! once; reads are served from that view.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use super::Page;
use super::Pagination;
use super::SortConfig;
use super::predicate;
use crate::config::TableConfig;
use crate::model::Record;
use crate::query::Direction;

/// Page size used when none is configured.
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Sort applied when the configuration has no default sort.
pub fn fallback_sort() -> SortConfig {
    SortConfig::desc("created_at")
}

/// Current filter values by filter key.
///
/// An absent key and an empty string both mean "no filter applied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the state from each descriptor's default value.
    pub fn seeded(config: &TableConfig) -> Self {
        let mut state = Self::new();
        for filter in config.filters() {
            if let Some(value) = filter.default_value() {
                state.set(filter.key(), value);
            }
        }
        state
    }

    /// Returns the value for `key`, or `""` when unset.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Sets the value for `key`. An empty value clears it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&key.into());
        } else {
            self.values.insert(key.into(), value);
        }
    }

    /// Returns `true` if `key` has a non-empty value.
    pub fn is_active(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    /// Returns `true` if no filter is applied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterates over the applied `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}

/// A user interaction coming from the filter bar or the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A filter control changed value.
    FilterChanged { key: String, value: String },
    /// A filter control's clear affordance was used.
    FilterCleared(String),
    /// Every filter was reset.
    FiltersCleared,
    /// The sort selector changed, as a `{key}-{direction}` value.
    SortSelected(String),
    /// A pagination button was pressed.
    PageChanged(usize),
}

/// Filter, sort and paging state for one list screen.
///
/// # Example
///
/// ```
/// use listview_lib::config::TableConfig;
/// use listview_lib::model::Record;
/// use listview_lib::query::{FilterDescriptor, SortConfig, TableQuery};
///
/// let config = TableConfig::builder()
///     .filter(FilterDescriptor::search("title", "Title"))
///     .default_sort(SortConfig::asc("title"))
///     .build()
///     .unwrap();
///
/// let records = vec![
///     Record::new().set("title", "Banana"),
///     Record::new().set("title", "Apple"),
/// ];
///
/// let mut query = TableQuery::new(records, config);
/// query.handle_filter_change("title", "app");
///
/// assert_eq!(query.total_items(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableQuery {
    records: Vec<Record>,
    config: TableConfig,
    filters: FilterState,
    sort: SortConfig,
    current_page: usize,
    items_per_page: NonZeroUsize,
    /// Indices into `records` of the matching rows, in display order.
    view: Vec<usize>,
}

impl TableQuery {
    /// Creates an engine over `records`, seeded from `config`.
    pub fn new(records: Vec<Record>, config: TableConfig) -> Self {
        let filters = FilterState::seeded(&config);
        let sort = config.default_sort().cloned().unwrap_or_else(fallback_sort);
        let mut query = Self {
            records,
            config,
            filters,
            sort,
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            view: Vec::new(),
        };
        query.recompute();
        query
    }

    /// Sets the page size (builder pattern).
    pub fn with_items_per_page(mut self, items_per_page: NonZeroUsize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    // =========================================================================
    // Derived view
    // =========================================================================

    /// Returns the filtered and sorted records.
    pub fn filtered_data(&self) -> Vec<&Record> {
        self.view.iter().map(|&i| &self.records[i]).collect()
    }

    /// Returns the number of records after filtering.
    pub fn total_items(&self) -> usize {
        self.view.len()
    }

    /// Returns the number of pages after filtering.
    pub fn total_pages(&self) -> usize {
        self.pagination().total_pages()
    }

    /// Returns the page math for the current state.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.items_per_page, self.current_page, self.view.len())
    }

    /// Returns the rows of the current page.
    ///
    /// A page past the end yields an empty page.
    pub fn page(&self) -> Page<'_> {
        let pagination = self.pagination();
        let rows = self.view[pagination.range()]
            .iter()
            .map(|&i| &self.records[i])
            .collect();
        Page::new(rows, pagination)
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Returns the source records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the current filter values.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Returns the active sort.
    pub fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    /// Returns the current page (1-indexed).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the page size.
    pub fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Moves to page `page`. Callers are responsible for clamping.
    pub fn set_current_page(&mut self, page: usize) {
        log::debug!("page {} -> {}", self.current_page, page);
        self.current_page = page;
    }

    /// Sets one filter value and returns to the first page.
    ///
    /// An empty value removes the filter.
    pub fn handle_filter_change(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.set(key, value);
        self.current_page = 1;
        self.recompute();
    }

    /// Replaces the sort. The current page is kept.
    pub fn handle_sort_change(&mut self, key: impl Into<String>, direction: Direction) {
        self.sort = SortConfig::new(key, direction);
        self.recompute();
    }

    /// Removes every filter value and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.current_page = 1;
        self.recompute();
    }

    /// Changes the page size and returns to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: NonZeroUsize) {
        self.items_per_page = items_per_page;
        self.current_page = 1;
    }

    /// Replaces the source records, keeping filters, sort and page.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.recompute();
    }

    /// Replaces the configuration.
    ///
    /// Values for filters that still exist are kept; new filters are seeded
    /// from their defaults. The sort is kept.
    pub fn set_config(&mut self, config: TableConfig) {
        let mut filters = FilterState::seeded(&config);
        for (key, value) in self.filters.iter() {
            if config.filter(key).is_some() {
                filters.set(key, value);
            }
        }
        self.filters = filters;
        self.config = config;
        self.recompute();
    }

    /// Applies a user interaction.
    ///
    /// An unparseable sort selector value is ignored.
    pub fn apply(&mut self, event: TableEvent) {
        match event {
            TableEvent::FilterChanged { key, value } => self.handle_filter_change(key, value),
            TableEvent::FilterCleared(key) => self.handle_filter_change(key, ""),
            TableEvent::FiltersCleared => self.clear_filters(),
            TableEvent::SortSelected(value) => match SortConfig::parse(&value) {
                Some(sort) => self.handle_sort_change(sort.key, sort.direction),
                None => log::warn!("ignoring sort selector value '{}'", value),
            },
            TableEvent::PageChanged(page) => self.set_current_page(page),
        }
    }

    fn recompute(&mut self) {
        let active: Vec<_> = self
            .config
            .filters()
            .iter()
            .filter_map(|filter| {
                let value = self.filters.get(filter.key());
                (!value.is_empty()).then_some((filter, value))
            })
            .collect();

        let mut view: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                active
                    .iter()
                    .all(|(filter, value)| predicate::matches(filter, &self.config, record, value))
            })
            .map(|(i, _)| i)
            .collect();

        let records = &self.records;
        let sort = &self.sort;
        view.sort_by(|&a, &b| sort.compare(&records[a], &records[b]));

        log::debug!(
            "recomputed view: {} of {} records match {} active filter(s), sorted by {}",
            view.len(),
            self.records.len(),
            active.len(),
            self.sort.to_value()
        );
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::query::FilterDescriptor;
    use crate::query::FilterOption;

    fn per(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn names(query: &TableQuery) -> Vec<String> {
        query
            .filtered_data()
            .iter()
            .map(|r| r.get_string("name").unwrap().unwrap().to_string())
            .collect()
    }

    fn contacts() -> Vec<Record> {
        vec![
            Record::new().set("name", "Carol").set("status", "new").set("is_active", true),
            Record::new().set("name", "alice").set("status", "read").set("is_active", false),
            Record::new().set("name", "Bob").set("status", "new").set("is_active", true),
        ]
    }

    fn config() -> TableConfig {
        TableConfig::builder()
            .filter(FilterDescriptor::search("name", "Name"))
            .filter(FilterDescriptor::select(
                "status",
                "Status",
                [FilterOption::new("all", "All"), FilterOption::new("new", "New")],
            ))
            .filter(FilterDescriptor::boolean("is_active", "Active"))
            .default_sort(SortConfig::asc("name"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let query = TableQuery::new(contacts(), config());
        assert_eq!(query.total_items(), 3);
        // uppercase sorts before lowercase
        assert_eq!(names(&query), vec!["Bob", "Carol", "alice"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let mut query = TableQuery::new(contacts(), config());
        query.handle_filter_change("status", "new");
        query.handle_filter_change("name", "car");
        assert_eq!(names(&query), vec!["Carol"]);
    }

    #[test]
    fn test_empty_value_clears_filter() {
        let mut query = TableQuery::new(contacts(), config());
        query.handle_filter_change("status", "read");
        assert_eq!(query.total_items(), 1);
        query.apply(TableEvent::FilterCleared("status".into()));
        assert_eq!(query.total_items(), 3);
        assert!(query.filters().is_empty());
    }

    #[test]
    fn test_unknown_filter_key_is_ignored() {
        let mut query = TableQuery::new(contacts(), config());
        query.handle_filter_change("nonexistent", "whatever");
        assert_eq!(query.total_items(), 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = TableQuery::new(contacts(), config()).with_items_per_page(per(1));
        query.set_current_page(3);
        query.handle_filter_change("status", "all");
        assert_eq!(query.current_page(), 1);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut query = TableQuery::new(contacts(), config()).with_items_per_page(per(1));
        query.set_current_page(2);
        query.handle_sort_change("name", Direction::Desc);
        assert_eq!(query.current_page(), 2);
        assert_eq!(names(&query), vec!["alice", "Carol", "Bob"]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let mut query = TableQuery::new(contacts(), config()).with_items_per_page(per(2));
        assert_eq!(query.total_pages(), 2);
        query.set_current_page(5);
        assert!(query.page().is_empty());
    }

    #[test]
    fn test_page_zero_is_empty() {
        let mut query = TableQuery::new(contacts(), config());
        query.apply(TableEvent::PageChanged(0));
        assert!(query.page().is_empty());
        assert_eq!(query.total_items(), 3);
    }

    #[test]
    fn test_sort_mixed_numbers_near_float_precision() {
        let two_53 = 1i64 << 53;
        let records: Vec<Record> = (0..64i64)
            .map(|k| {
                let n = if k % 3 == 0 {
                    Value::Float(two_53 as f64)
                } else {
                    Value::Int(two_53 + k)
                };
                Record::new().set("id", k).set("n", n)
            })
            .collect();
        let mut query = TableQuery::new(records, config());

        query.handle_sort_change("n", Direction::Asc);
        let sorted: Vec<&Value> = query.filtered_data().iter().map(|r| r.get("n").unwrap()).collect();
        assert_eq!(sorted.len(), 64);
        assert!(sorted.windows(2).all(|w| w[0].compare(w[1]) != std::cmp::Ordering::Greater));
        assert_eq!(sorted[0], &Value::Float(two_53 as f64));
        assert_eq!(sorted[63], &Value::Int(two_53 + 62));
    }

    #[test]
    fn test_default_values_seed_filters() {
        let config = TableConfig::builder()
            .filter(FilterDescriptor::boolean("is_active", "Active").with_default("true"))
            .build()
            .unwrap();
        let query = TableQuery::new(contacts(), config);
        assert_eq!(query.filters().get("is_active"), "true");
        assert_eq!(query.total_items(), 2);
    }

    #[test]
    fn test_fallback_sort() {
        let config = TableConfig::builder().build().unwrap();
        let query = TableQuery::new(Vec::new(), config);
        assert_eq!(query.sort_config(), &SortConfig::desc("created_at"));
    }

    #[test]
    fn test_sort_selected_event() {
        let mut query = TableQuery::new(contacts(), config());
        query.apply(TableEvent::SortSelected("name-desc".into()));
        assert_eq!(query.sort_config(), &SortConfig::desc("name"));

        query.apply(TableEvent::SortSelected("garbage".into()));
        assert_eq!(query.sort_config(), &SortConfig::desc("name"));
    }

    #[test]
    fn test_set_records_recomputes() {
        let mut query = TableQuery::new(Vec::new(), config());
        query.handle_filter_change("status", "new");
        query.set_records(contacts());
        assert_eq!(query.total_items(), 2);
    }

    #[test]
    fn test_set_config_keeps_surviving_values() {
        let mut query = TableQuery::new(contacts(), config());
        query.handle_filter_change("status", "new");
        query.handle_filter_change("is_active", "true");

        let narrower = TableConfig::builder()
            .filter(FilterDescriptor::select("status", "Status", []))
            .build()
            .unwrap();
        query.set_config(narrower);

        assert_eq!(query.filters().get("status"), "new");
        assert_eq!(query.filters().get("is_active"), "");
    }

    #[test]
    fn test_filtering_is_not_cumulative() {
        let mut query = TableQuery::new(contacts(), config());
        query.handle_filter_change("status", "new");
        let first = names(&query);
        query.handle_filter_change("status", "new");
        assert_eq!(names(&query), first);
    }
}
