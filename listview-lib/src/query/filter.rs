//! Filter descriptors for list screens.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;

/// A matching function `(record, filter value) -> bool`.
///
/// Cheap to clone; the closure is shared.
///
/// # Example
///
/// ```
/// use listview_lib::model::Record;
/// use listview_lib::query::Predicate;
///
/// let featured = Predicate::new(|record: &Record, value: &str| {
///     value == "all" || record.get_bool("is_featured").ok().flatten() == Some(true)
/// });
///
/// assert!(featured.matches(&Record::new(), "all"));
/// ```
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Record, &str) -> bool + Send + Sync>);

impl Predicate {
    /// Wraps a closure as a predicate.
    pub fn new(f: impl Fn(&Record, &str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluates the predicate.
    pub fn matches(&self, record: &Record, value: &str) -> bool {
        (self.0)(record, value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// The matching rule of a filter.
///
/// Every kind except `Custom` has a built-in rule (see
/// [`predicate`](super::predicate)). `Custom` carries its own predicate, so a
/// custom filter without one cannot be constructed.
#[derive(Debug, Clone)]
pub enum FilterKind {
    /// Case-insensitive substring search.
    Search,
    /// Exact match against one of the options; `"all"` matches everything.
    Select,
    /// Matches a boolean field against `"true"` / `"false"`.
    Boolean,
    /// Date input. Range matching is not implemented; always matches.
    Date,
    /// Matching delegated entirely to the predicate.
    Custom(Predicate),
}

impl FilterKind {
    /// Returns the configuration tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            FilterKind::Search => "search",
            FilterKind::Select => "select",
            FilterKind::Boolean => "boolean",
            FilterKind::Date => "date",
            FilterKind::Custom(_) => "custom",
        }
    }
}

/// A choice offered by a select-style filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value written to the filter state when chosen.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl FilterOption {
    /// Creates a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One filter control and its matching semantics.
///
/// # Example
///
/// ```
/// use listview_lib::query::{FilterDescriptor, FilterOption};
///
/// let category = FilterDescriptor::select("category", "Category", [
///     FilterOption::new("all", "All categories"),
///     FilterOption::new("news", "News"),
/// ])
/// .with_default("all");
///
/// assert_eq!(category.key(), "category");
/// ```
#[derive(Debug, Clone)]
pub struct FilterDescriptor {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) kind: FilterKind,
    pub(crate) options: Vec<FilterOption>,
    pub(crate) default_value: Option<String>,
    pub(crate) placeholder: Option<String>,
    /// Overrides the built-in rule of a non-custom kind.
    pub(crate) predicate: Option<Predicate>,
}

impl FilterDescriptor {
    /// Creates a descriptor of the given kind.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            default_value: None,
            placeholder: None,
            predicate: None,
        }
    }

    /// Creates a search filter.
    pub fn search(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Search)
    }

    /// Creates a select filter with the given options.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = FilterOption>,
    ) -> Self {
        Self::new(key, label, FilterKind::Select).with_options(options)
    }

    /// Creates a boolean filter.
    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Boolean)
    }

    /// Creates a date filter.
    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Date)
    }

    /// Creates a custom filter matched by `f`.
    pub fn custom(
        key: impl Into<String>,
        label: impl Into<String>,
        f: impl Fn(&Record, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, label, FilterKind::Custom(Predicate::new(f)))
    }

    /// Sets the options offered by the control.
    pub fn with_options(mut self, options: impl IntoIterator<Item = FilterOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Sets the value the filter state is seeded with.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the placeholder text of the control.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Replaces the built-in matching rule with `predicate`.
    ///
    /// For a `Custom` filter this replaces its predicate.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        match &mut self.kind {
            FilterKind::Custom(existing) => *existing = predicate,
            _ => self.predicate = Some(predicate),
        }
        self
    }

    /// Returns the filter key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the label shown next to the control.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the filter kind.
    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    /// Returns the control options.
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Returns the seed value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns the placeholder text, if any.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns the predicate that decides matching, if this filter has one.
    pub fn delegate(&self) -> Option<&Predicate> {
        match &self.kind {
            FilterKind::Custom(predicate) => Some(predicate),
            _ => self.predicate.as_ref(),
        }
    }
}
