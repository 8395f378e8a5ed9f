//! A list screen: store, query engine and columns wired together.

use std::num::NonZeroUsize;

use crate::config::TableConfig;
use crate::model::Record;
use crate::model::Value;
use crate::query::TableEvent;
use crate::query::TableQuery;
use crate::render::Columns;
use crate::render::FilterBarView;
use crate::render::TableProps;
use crate::render::TableView;
use crate::render::render_filter_bar;
use crate::render::render_table;
use crate::store::ResourceStore;

/// Empty-state text used when none is configured.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No records found";

/// A dismissible fetch error shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub message: String,
}

/// An admin list screen.
///
/// Store commands keep the query engine's records in sync; UI events go to
/// [`handle`](Self::handle).
///
/// # Example
///
/// ```
/// use listview_lib::model::Record;
/// use listview_lib::presets;
/// use listview_lib::screen::ListScreen;
/// use listview_lib::store::ResourceStore;
///
/// let mut screen = ListScreen::new(
///     ResourceStore::new("posts"),
///     presets::posts_config(),
///     presets::posts_columns(),
/// );
///
/// screen.load_succeeded(vec![Record::new().set("id", 1i64).set("title", "Hello")]);
/// assert_eq!(screen.query().total_items(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ListScreen {
    store: ResourceStore,
    query: TableQuery,
    columns: Columns,
    empty_message: String,
}

impl ListScreen {
    /// Creates a screen over the store's current records.
    pub fn new(store: ResourceStore, config: TableConfig, columns: Columns) -> Self {
        let query = TableQuery::new(store.records().to_vec(), config);
        Self {
            store,
            query,
            columns,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    /// Sets the empty-state text (builder pattern).
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the page size (builder pattern).
    pub fn with_items_per_page(mut self, items_per_page: NonZeroUsize) -> Self {
        self.query.set_items_per_page(items_per_page);
        self
    }

    /// Returns the query engine.
    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    /// Returns the resource store.
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Returns the columns.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    // =========================================================================
    // Render inputs
    // =========================================================================

    /// Returns the props for the table renderer.
    pub fn table_props(&self) -> TableProps<'_> {
        TableProps::from_page(self.query.page(), self.store.is_loading(), self.empty_message.clone())
    }

    /// Renders the table.
    pub fn table_view(&self) -> TableView {
        render_table(&self.table_props(), &self.columns)
    }

    /// Renders the filter bar.
    pub fn filter_bar(&self) -> FilterBarView {
        render_filter_bar(self.query.config(), self.query.filters(), self.query.sort_config())
    }

    /// Returns the error panel, if a fetch error is pending.
    pub fn error_panel(&self) -> Option<ErrorPanel> {
        self.store.error().map(|message| ErrorPanel {
            message: message.to_string(),
        })
    }

    // =========================================================================
    // Events and store commands
    // =========================================================================

    /// Applies a filter bar or pagination event.
    pub fn handle(&mut self, event: TableEvent) {
        self.query.apply(event);
    }

    /// See [`ResourceStore::load_started`].
    pub fn load_started(&mut self) {
        self.store.load_started();
    }

    /// See [`ResourceStore::load_succeeded`].
    pub fn load_succeeded(&mut self, records: Vec<Record>) {
        self.store.load_succeeded(records);
        self.sync();
    }

    /// See [`ResourceStore::load_failed`].
    pub fn load_failed(&mut self, error: impl Into<String>) {
        self.store.load_failed(error);
    }

    /// Dismisses the error panel.
    pub fn dismiss_error(&mut self) {
        self.store.error_dismissed();
    }

    /// See [`ResourceStore::upserted`].
    pub fn upserted(&mut self, record: Record) {
        self.store.upserted(record);
        self.sync();
    }

    /// See [`ResourceStore::removed`].
    pub fn removed(&mut self, id: &Value) -> bool {
        let removed = self.store.removed(id);
        if removed {
            self.sync();
        }
        removed
    }

    fn sync(&mut self) {
        self.query.set_records(self.store.records().to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::render::TableBody;

    fn screen() -> ListScreen {
        ListScreen::new(
            ResourceStore::new("contacts"),
            presets::contacts_config(),
            presets::contacts_columns(),
        )
        .with_empty_message("No contacts found")
    }

    fn contact(id: i64, name: &str, status: &str) -> Record {
        Record::new()
            .set("id", id)
            .set("name", name)
            .set("email", format!("{}@example.com", name.to_lowercase()))
            .set("status", status)
            .set("created_at", format!("2024-01-{:02}T10:00:00Z", id))
    }

    #[test]
    fn test_loading_shows_placeholder() {
        let mut screen = screen();
        screen.load_started();
        assert!(matches!(screen.table_view().body, TableBody::Loading { .. }));
    }

    #[test]
    fn test_empty_message() {
        let mut screen = screen();
        screen.load_succeeded(Vec::new());
        assert_eq!(
            screen.table_view().body,
            TableBody::Empty {
                message: "No contacts found".into(),
                colspan: screen.columns().len(),
            }
        );
    }

    #[test]
    fn test_error_panel_dismiss() {
        let mut screen = screen();
        screen.load_failed("Request failed with status 500");
        assert_eq!(
            screen.error_panel(),
            Some(ErrorPanel {
                message: "Request failed with status 500".into()
            })
        );
        screen.dismiss_error();
        assert!(screen.error_panel().is_none());
    }

    #[test]
    fn test_events_reach_query() {
        let mut screen = screen();
        screen.load_succeeded(vec![
            contact(1, "Ann", "new"),
            contact(2, "Ben", "replied"),
            contact(3, "Cy", "new"),
        ]);

        let bar = screen.filter_bar();
        let status = bar.controls.iter().find(|c| c.key == "status").unwrap();
        screen.handle(status.change_event("new"));
        assert_eq!(screen.query().total_items(), 2);

        let status = screen.filter_bar().controls.into_iter().find(|c| c.key == "status").unwrap();
        assert!(status.clearable);
        screen.handle(status.clear_event());
        assert_eq!(screen.query().total_items(), 3);
    }

    #[test]
    fn test_store_commands_sync_query() {
        let mut screen = screen();
        screen.load_succeeded(vec![contact(1, "Ann", "new")]);
        screen.upserted(contact(2, "Ben", "new"));
        assert_eq!(screen.query().total_items(), 2);

        assert!(screen.removed(&Value::Int(1)));
        assert_eq!(screen.query().total_items(), 1);
    }
}
