//! Table render model.
//!
//! [`render_table`] is a pure function from already-paged rows to a
//! [`TableView`]. It knows nothing about filtering or sorting.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::error::ColumnError;
use crate::model::Record;
use crate::model::Value;
use crate::query::Page;

/// Maximum number of numbered page buttons.
pub const PAGE_WINDOW: usize = 5;

// =============================================================================
// Columns
// =============================================================================

/// Renders one cell of a column from its row.
#[derive(Clone)]
pub struct CellRenderer(Arc<dyn Fn(&Record) -> String + Send + Sync>);

impl CellRenderer {
    /// Wraps a closure as a cell renderer.
    pub fn new(f: impl Fn(&Record) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer(..)")
    }
}

/// A table column definition.
#[derive(Debug, Clone)]
pub struct Column {
    /// Unique identifier for this column, and the default field it shows.
    pub key: String,
    /// Header text displayed at the top.
    pub header: String,
    render: Option<CellRenderer>,
}

impl Column {
    /// Creates a column showing the field named `key`.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            render: None,
        }
    }

    /// Renders cells with `f` instead of the raw field value.
    pub fn with_render(mut self, f: impl Fn(&Record) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(CellRenderer::new(f));
        self
    }

    /// Renders this column's cell for `record`.
    pub fn render_cell(&self, record: &Record) -> String {
        match &self.render {
            Some(render) => (render.0)(record),
            None => record.get(&self.key).map(Value::to_string).unwrap_or_default(),
        }
    }
}

/// An ordered set of columns with unique keys.
#[derive(Debug, Clone)]
pub struct Columns(Vec<Column>);

impl Columns {
    /// Validates column keys are unique.
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Result<Self, ColumnError> {
        let columns: Vec<Column> = columns.into_iter().collect();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(ColumnError::Duplicate(column.key.clone()));
            }
        }
        Ok(Self(columns))
    }

    /// Returns the columns in order.
    pub fn as_slice(&self) -> &[Column] {
        &self.0
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Props and view
// =============================================================================

/// Everything the table renderer needs.
#[derive(Debug, Clone)]
pub struct TableProps<'a> {
    /// Rows of the current page only.
    pub data: Vec<&'a Record>,
    pub is_loading: bool,
    pub empty_message: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: NonZeroUsize,
    pub total_items: usize,
}

impl<'a> TableProps<'a> {
    /// Builds props from a page of the query engine.
    pub fn from_page(page: Page<'a>, is_loading: bool, empty_message: impl Into<String>) -> Self {
        let pagination = page.pagination();
        Self {
            data: page.into_rows(),
            is_loading,
            empty_message: empty_message.into(),
            current_page: pagination.current_page,
            total_pages: pagination.total_pages(),
            items_per_page: pagination.per_page,
            total_items: pagination.total_items,
        }
    }
}

/// Rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    pub pagination: Option<PaginationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub text: String,
}

/// Body of the table. Placeholder rows and real rows never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Skeleton of `rows` x `columns` placeholder cells.
    Loading { rows: usize, columns: usize },
    /// A single row spanning every column.
    Empty { message: String, colspan: usize },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// The record's `id`, or the row index when it has none.
    pub key: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    /// `{row key}-{column key}`.
    pub key: String,
    pub text: String,
}

/// Pagination bar below the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub summary: Summary,
    pub prev: NavButton,
    pub next: NavButton,
    pub items: Vec<PageItem>,
}

/// "Showing `from` to `to` of `total`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} to {} of {} results", self.from, self.to, self.total)
    }
}

/// Prev/Next button. Disabled rather than hidden at the boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButton {
    pub target: usize,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders `props` with `columns`.
pub fn render_table(props: &TableProps<'_>, columns: &Columns) -> TableView {
    let headers = columns
        .as_slice()
        .iter()
        .map(|c| HeaderCell {
            key: c.key.clone(),
            text: c.header.clone(),
        })
        .collect();

    let body = if props.is_loading {
        TableBody::Loading {
            rows: props.items_per_page.get(),
            columns: columns.len(),
        }
    } else if props.data.is_empty() {
        TableBody::Empty {
            message: props.empty_message.clone(),
            colspan: columns.len(),
        }
    } else {
        TableBody::Rows(
            props
                .data
                .iter()
                .enumerate()
                .map(|(index, record)| render_row(index, record, columns))
                .collect(),
        )
    };

    let pagination = (!props.data.is_empty() && props.total_pages > 1).then(|| {
        let current = props.current_page;
        let per_page = props.items_per_page.get();
        PaginationView {
            summary: Summary {
                from: current.saturating_sub(1) * per_page + 1,
                to: current.saturating_mul(per_page).min(props.total_items),
                total: props.total_items,
            },
            prev: NavButton {
                target: current.saturating_sub(1),
                enabled: current > 1,
            },
            next: NavButton {
                target: current + 1,
                enabled: current < props.total_pages,
            },
            items: page_window(current, props.total_pages, PAGE_WINDOW),
        }
    });

    TableView {
        headers,
        body,
        pagination,
    }
}

fn render_row(index: usize, record: &Record, columns: &Columns) -> RowView {
    let key = record
        .id()
        .map(Value::to_string)
        .unwrap_or_else(|| index.to_string());
    let cells = columns
        .as_slice()
        .iter()
        .map(|column| CellView {
            key: format!("{}-{}", key, column.key),
            text: column.render_cell(record),
        })
        .collect();
    RowView { key, cells }
}

/// Numbered page buttons around `current`.
///
/// At most `max` consecutive pages, centered on `current` and shifted to stay
/// inside `1..=total`. Page 1 and page `total` are always reachable: when the
/// window misses them they are added at the edges, with an ellipsis if there
/// is a gap.
pub fn page_window(current: usize, total: usize, max: usize) -> Vec<PageItem> {
    if total == 0 || max == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(max / 2).max(1);
    let end = (start + max - 1).min(total);
    if end + 1 - start < max {
        start = (end + 1).saturating_sub(max).max(1);
    }

    let mut items = Vec::with_capacity(max + 4);
    if start > 1 {
        items.push(PageItem::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(|number| PageItem::Page {
        number,
        current: number == current,
    }));
    if end < total {
        if end + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page {
            number: total,
            current: false,
        });
    }
    items
}
