//! Sortable, groupable, filterable table over a loaded collection
//!
//! [`TableState`] is an immutable value advanced by [`TableState::reduce`].
//! [`derive_view`] projects a slice of rows through a state without touching
//! the rows themselves.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One column of a record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

/// Typed cell contents, ordered naturally per kind
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    List(Vec<String>),
}

impl CellValue {
    /// Text used for filtering and grouping
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::List(items) => items.join(", "),
        }
    }

    /// Lexical for text, numeric for numbers, chronological for dates.
    /// Empty cells sort first; mismatched kinds fall back to their text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

/// A record that can be shown as a table row
pub trait TableRecord {
    const COLUMNS: &'static [Column];
    /// Column used when grouping is switched on
    const GROUP_COLUMN: &'static str;

    fn cell(&self, column: &str) -> CellValue;

    fn has_column(column: &str) -> bool {
        Self::COLUMNS.iter().any(|c| c.key == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Cycle a column through ascending, descending and unsorted
    ToggleSort(String),
    ToggleGrouping,
    /// An empty value removes the column's filter
    SetFilter(String, String),
    ClearFilters,
}

/// View state of one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sort: Option<SortKey>,
    pub grouped: bool,
    pub filters: BTreeMap<String, String>,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after `action`; `self` is left as it was
    pub fn reduce(&self, action: TableAction) -> TableState {
        let mut next = self.clone();
        match action {
            TableAction::ToggleSort(column) => {
                next.sort = match &self.sort {
                    Some(SortKey {
                        column: current,
                        direction: SortDirection::Ascending,
                    }) if *current == column => Some(SortKey {
                        column,
                        direction: SortDirection::Descending,
                    }),
                    Some(SortKey {
                        column: current,
                        direction: SortDirection::Descending,
                    }) if *current == column => None,
                    _ => Some(SortKey {
                        column,
                        direction: SortDirection::Ascending,
                    }),
                };
            }
            TableAction::ToggleGrouping => next.grouped = !self.grouped,
            TableAction::SetFilter(column, value) => {
                if value.is_empty() {
                    next.filters.remove(&column);
                } else {
                    next.filters.insert(column, value);
                }
            }
            TableAction::ClearFilters => next.filters.clear(),
        }
        next
    }

    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortKey {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn with_grouping(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    pub fn with_filter(self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.reduce(TableAction::SetFilter(column.into(), value.into()))
    }
}

/// Rows sharing one grouping key; `key` is `None` when ungrouped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGroup<R> {
    pub key: Option<String>,
    pub rows: Vec<R>,
}

/// Derived projection of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<R> {
    pub columns: &'static [Column],
    pub state: TableState,
    pub grouped_by: Option<&'static str>,
    pub total: usize,
    pub visible: usize,
    pub groups: Vec<RowGroup<R>>,
}

impl<R> TableView<R> {
    /// Visible rows in display order, across groups
    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }
}

/// Filter, then sort, then group `rows` according to `state`.
///
/// Filters are case-insensitive substring matches combined with AND; filters
/// and sort keys naming unknown columns are ignored. Sorting is stable.
pub fn derive_view<R: TableRecord + Clone>(rows: &[R], state: &TableState) -> TableView<R> {
    let filters: Vec<(&str, String)> = state
        .filters
        .iter()
        .filter(|(column, value)| R::has_column(column) && !value.is_empty())
        .map(|(column, value)| (column.as_str(), value.to_lowercase()))
        .collect();

    let mut visible: Vec<&R> = rows
        .iter()
        .filter(|row| {
            filters.iter().all(|(column, needle)| {
                row.cell(column).display().to_lowercase().contains(needle.as_str())
            })
        })
        .collect();

    if let Some(sort) = state.sort.as_ref().filter(|s| R::has_column(&s.column)) {
        visible.sort_by(|a, b| {
            let ordering = a.cell(&sort.column).compare(&b.cell(&sort.column));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let count = visible.len();
    let groups = if state.grouped {
        let mut grouped: IndexMap<String, Vec<R>> = IndexMap::new();
        for row in visible {
            grouped
                .entry(row.cell(R::GROUP_COLUMN).display())
                .or_default()
                .push(row.clone());
        }
        grouped
            .into_iter()
            .map(|(key, rows)| RowGroup {
                key: Some(key),
                rows,
            })
            .collect()
    } else {
        vec![RowGroup {
            key: None,
            rows: visible.into_iter().cloned().collect(),
        }]
    };

    TableView {
        columns: R::COLUMNS,
        state: state.clone(),
        grouped_by: state.grouped.then_some(R::GROUP_COLUMN),
        total: rows.len(),
        visible: count,
        groups,
    }
}

/// A loaded collection with its current view state.
///
/// The rows are fixed at [`Table::load`]; actions and [`Table::refresh`]
/// recompute the view from them without fetching again.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
    state: TableState,
    view: TableView<R>,
}

impl<R: TableRecord + Clone> Table<R> {
    pub fn load(rows: Vec<R>) -> Self {
        Self::with_state(rows, TableState::default())
    }

    pub fn with_state(rows: Vec<R>, state: TableState) -> Self {
        let view = derive_view(&rows, &state);
        Self { rows, state, view }
    }

    pub fn dispatch(&mut self, action: TableAction) -> &TableView<R> {
        self.state = self.state.reduce(action);
        self.refresh()
    }

    pub fn refresh(&mut self) -> &TableView<R> {
        self.view = derive_view(&self.rows, &self.state);
        &self.view
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn view(&self) -> &TableView<R> {
        &self.view
    }

    pub fn into_view(self) -> TableView<R> {
        self.view
    }
}
