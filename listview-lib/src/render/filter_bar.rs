//! Filter bar render model.

use crate::config::TableConfig;
use crate::query::Direction;
use crate::query::FilterDescriptor;
use crate::query::FilterKind;
use crate::query::FilterOption;
use crate::query::FilterState;
use crate::query::SortConfig;
use crate::query::TableEvent;

/// Rendered filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarView {
    pub controls: Vec<FilterControl>,
    /// Present only when the configuration has sort options.
    pub sort: Option<SortSelector>,
}

/// Input widget of a filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlWidget {
    TextInput { placeholder: Option<String> },
    Select { options: Vec<FilterOption> },
    DateInput,
}

/// One filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub key: String,
    pub label: String,
    pub widget: ControlWidget,
    pub value: String,
    /// Whether the clear affordance is shown.
    pub clearable: bool,
}

impl FilterControl {
    /// Event for the control taking a new value.
    pub fn change_event(&self, value: impl Into<String>) -> TableEvent {
        TableEvent::FilterChanged {
            key: self.key.clone(),
            value: value.into(),
        }
    }

    /// Event for the clear affordance.
    pub fn clear_event(&self) -> TableEvent {
        TableEvent::FilterCleared(self.key.clone())
    }
}

/// Combined sort field and direction selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSelector {
    /// `{key}-asc` / `{key}-desc` pairs for every sort option.
    pub options: Vec<FilterOption>,
    /// The selected `{key}-{direction}` value.
    pub value: String,
}

impl SortSelector {
    /// Event for selecting `value`.
    pub fn change_event(&self, value: impl Into<String>) -> TableEvent {
        TableEvent::SortSelected(value.into())
    }
}

/// Renders one control per filter plus the sort selector.
pub fn render_filter_bar(config: &TableConfig, filters: &FilterState, sort: &SortConfig) -> FilterBarView {
    let controls = config
        .filters()
        .iter()
        .map(|filter| render_control(filter, filters.get(filter.key())))
        .collect();

    let sort = (!config.sort_options().is_empty()).then(|| SortSelector {
        options: config
            .sort_options()
            .iter()
            .flat_map(|option| {
                [Direction::Asc, Direction::Desc].map(|direction| {
                    FilterOption::new(
                        SortConfig::new(option.key.clone(), direction).to_value(),
                        format!("{} ({})", option.label, direction_label(direction)),
                    )
                })
            })
            .collect(),
        value: sort.to_value(),
    });

    FilterBarView { controls, sort }
}

fn render_control(filter: &FilterDescriptor, value: &str) -> FilterControl {
    let widget = match filter.kind() {
        FilterKind::Search => ControlWidget::TextInput {
            placeholder: filter.placeholder().map(str::to_string),
        },
        FilterKind::Select | FilterKind::Custom(_) => ControlWidget::Select {
            options: filter.options().to_vec(),
        },
        FilterKind::Boolean => ControlWidget::Select {
            options: if filter.options().is_empty() {
                vec![FilterOption::new("true", "Yes"), FilterOption::new("false", "No")]
            } else {
                filter.options().to_vec()
            },
        },
        FilterKind::Date => ControlWidget::DateInput,
    };

    FilterControl {
        key: filter.key().to_string(),
        label: filter.label().to_string(),
        widget,
        value: value.to_string(),
        clearable: !value.is_empty(),
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "ascending",
        Direction::Desc => "descending",
    }
}
