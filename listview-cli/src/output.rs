//! Text rendering of the list screen render models.

use comfy_table::Cell;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use listview_lib::render::ControlWidget;
use listview_lib::render::FilterBarView;
use listview_lib::render::PageItem;
use listview_lib::render::PaginationView;
use listview_lib::render::TableBody;
use listview_lib::render::TableView;
use listview_lib::screen::ErrorPanel;

const PLACEHOLDER: &str = "░░░░░░";

/// Renders the filter bar as a Filter / Value / Options table, followed by
/// the sort selector line.
pub fn filter_bar(view: &FilterBarView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Filter", "Value", "Options"]);

    for control in &view.controls {
        let options = match &control.widget {
            ControlWidget::TextInput { placeholder } => placeholder.clone().unwrap_or_default(),
            ControlWidget::Select { options } => options
                .iter()
                .map(|o| o.value.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            ControlWidget::DateInput => "YYYY-MM-DD".to_string(),
        };
        table.add_row(vec![
            Cell::new(&control.label),
            Cell::new(&control.value),
            Cell::new(options),
        ]);
    }

    let mut out = table.to_string();
    if let Some(sort) = &view.sort {
        let label = sort
            .options
            .iter()
            .find(|o| o.value == sort.value)
            .map(|o| o.label.as_str())
            .unwrap_or(sort.value.as_str());
        out.push_str(&format!("\nSort: {}", label));
    }
    out
}

/// Renders the table body and, when present, the pagination line.
pub fn table(view: &TableView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(view.headers.iter().map(|h| Cell::new(&h.text)));

    match &view.body {
        TableBody::Loading { rows, columns } => {
            for _ in 0..*rows {
                table.add_row(vec![Cell::new(PLACEHOLDER); *columns]);
            }
        }
        TableBody::Empty { message, .. } => {
            table.add_row(vec![Cell::new(message)]);
        }
        TableBody::Rows(rows) => {
            for row in rows {
                table.add_row(row.cells.iter().map(|c| Cell::new(&c.text)));
            }
        }
    }

    let mut out = table.to_string();
    if let Some(pagination) = &view.pagination {
        out.push('\n');
        out.push_str(&pagination_line(pagination));
    }
    out
}

/// `Showing 41 to 50 of 100 results  < 1 … 3 4 [5] 6 7 … 10 >`
pub fn pagination_line(view: &PaginationView) -> String {
    let prev = if view.prev.enabled { "<" } else { " " };
    let next = if view.next.enabled { ">" } else { " " };
    let pages: Vec<String> = view
        .items
        .iter()
        .map(|item| match item {
            PageItem::Page { number, current: true } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();
    format!("{}  {} {} {}", view.summary, prev, pages.join(" "), next)
}

pub fn error_panel(panel: &ErrorPanel) -> String {
    format!("Error: {}", panel.message)
}

#[cfg(test)]
mod tests {
    use listview_lib::model::Record;
    use listview_lib::presets;
    use listview_lib::query::TableEvent;
    use listview_lib::screen::ListScreen;
    use listview_lib::store::ResourceStore;

    use super::*;

    fn screen(count: i64) -> ListScreen {
        let mut screen = ListScreen::new(
            ResourceStore::new("users"),
            presets::users_config(),
            presets::users_columns(),
        );
        screen.load_succeeded(
            (1..=count)
                .map(|i| {
                    Record::new()
                        .set("id", i)
                        .set("name", format!("User {:02}", i))
                        .set("email", format!("user{}@example.com", i))
                        .set("created_at", format!("2024-02-{:02}T08:00:00Z", i))
                })
                .collect(),
        );
        screen
    }

    #[test]
    fn test_table_lists_rows_and_pages() {
        let mut screen = screen(25);
        screen.handle(TableEvent::PageChanged(2));

        let out = table(&screen.table_view());
        assert!(out.contains("User 15"));
        assert!(!out.contains("User 25"));
        assert!(out.contains("Showing 11 to 20 of 25 results  < 1 [2] 3 >"));
    }

    #[test]
    fn test_empty_and_loading() {
        let mut screen = screen(0);
        assert!(table(&screen.table_view()).contains("No records found"));

        screen.load_started();
        assert!(table(&screen.table_view()).contains(PLACEHOLDER));
    }

    #[test]
    fn test_filter_bar_shows_sort() {
        let screen = screen(1);
        let out = filter_bar(&screen.filter_bar());
        assert!(out.contains("Filter"));
        assert!(out.contains("Sort: "));
    }

    #[test]
    fn test_error_panel() {
        let panel = ErrorPanel {
            message: "Request failed".into(),
        };
        assert_eq!(error_panel(&panel), "Error: Request failed");
    }
}
