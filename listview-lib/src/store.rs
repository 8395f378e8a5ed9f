//! Per-resource list state.
//!
//! One [`ResourceStore`] per resource (posts, contacts, ...) holds the records
//! last delivered by the fetch layer together with the loading flag and the
//! last fetch error. It is changed only through its command methods.

use crate::model::Record;
use crate::model::Value;

/// Records, loading flag and error of one resource.
///
/// # Example
///
/// ```
/// use listview_lib::model::Record;
/// use listview_lib::store::ResourceStore;
///
/// let mut posts = ResourceStore::new("posts");
/// posts.load_started();
/// assert!(posts.is_loading());
///
/// posts.load_succeeded(vec![Record::new().set("id", 1i64)]);
/// assert_eq!(posts.records().len(), 1);
/// assert!(!posts.is_loading());
/// ```
#[derive(Debug, Clone)]
pub struct ResourceStore {
    name: String,
    records: Vec<Record>,
    is_loading: bool,
    error: Option<String>,
    /// Bumped whenever `records` changes.
    revision: u64,
}

impl ResourceStore {
    /// Creates an empty store for the named resource.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            is_loading: false,
            error: None,
            revision: 0,
        }
    }

    /// Returns the resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns the last fetch error, if not dismissed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns a counter that changes whenever the records change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// A fetch started. Clears any previous error.
    pub fn load_started(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// A fetch delivered `records`, replacing the current ones.
    pub fn load_succeeded(&mut self, records: Vec<Record>) {
        log::debug!("{}: loaded {} records", self.name, records.len());
        self.records = records;
        self.is_loading = false;
        self.revision += 1;
    }

    /// A fetch failed. The current records are kept.
    pub fn load_failed(&mut self, error: impl Into<String>) {
        let error = error.into();
        log::warn!("{}: load failed: {}", self.name, error);
        self.is_loading = false;
        self.error = Some(error);
    }

    /// Clears the error after the user dismissed it.
    pub fn error_dismissed(&mut self) {
        self.error = None;
    }

    /// Replaces the record with the same `id`, or inserts it first.
    pub fn upserted(&mut self, record: Record) {
        let position = record
            .id()
            .and_then(|id| self.records.iter().position(|r| r.id() == Some(id)));
        match position {
            Some(index) => self.records[index] = record,
            None => self.records.insert(0, record),
        }
        self.revision += 1;
    }

    /// Removes the record with the given `id`. Returns `true` if one was removed.
    pub fn removed(&mut self, id: &Value) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != Some(id));
        let changed = self.records.len() != before;
        if changed {
            self.revision += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Record {
        Record::new().set("id", id).set("title", title)
    }

    #[test]
    fn test_load_failed_keeps_records() {
        let mut store = ResourceStore::new("posts");
        store.load_succeeded(vec![post(1, "a")]);
        store.load_started();
        store.load_failed("Network error");

        assert_eq!(store.error(), Some("Network error"));
        assert_eq!(store.records().len(), 1);
        assert!(!store.is_loading());

        store.error_dismissed();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_load_started_clears_error() {
        let mut store = ResourceStore::new("posts");
        store.load_failed("boom");
        store.load_started();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_upsert_replaces_or_prepends() {
        let mut store = ResourceStore::new("posts");
        store.load_succeeded(vec![post(1, "a"), post(2, "b")]);

        store.upserted(post(2, "b2"));
        assert_eq!(store.records()[1].get_string("title").unwrap(), Some("b2"));

        store.upserted(post(3, "c"));
        assert_eq!(store.records()[0].get_string("title").unwrap(), Some("c"));
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn test_removed() {
        let mut store = ResourceStore::new("posts");
        store.load_succeeded(vec![post(1, "a"), post(2, "b")]);
        let revision = store.revision();

        assert!(store.removed(&Value::Int(1)));
        assert_eq!(store.records().len(), 1);
        assert!(store.revision() > revision);

        assert!(!store.removed(&Value::Int(42)));
    }
}
