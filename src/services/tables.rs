//! Table view service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::Equipment,
    repository::Repository,
    views::{derive_view, MaintenanceRow, SortDirection, TableRecord, TableState, TableView},
};

/// Prefix of query parameters carrying a column filter, e.g. `filter.name=Press`
pub const FILTER_PREFIX: &str = "filter.";

#[derive(Clone)]
pub struct TableService {
    repository: Repository,
}

impl TableService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn equipment_table(&self, state: &TableState) -> AppResult<TableView<Equipment>> {
        let equipment = self.repository.equipment_list().await?;
        Ok(derive_view(&equipment, state))
    }

    pub async fn maintenance_table(
        &self,
        state: &TableState,
    ) -> AppResult<TableView<MaintenanceRow>> {
        let equipment = self.repository.equipment_list().await?;
        let records = self.repository.maintenance_list().await?;
        let rows = MaintenanceRow::resolve(records, &equipment);
        Ok(derive_view(&rows, state))
    }
}

/// Build a table state from `sort`, `order`, `group` and `filter.<column>`
/// query parameters. Sorting by a column the record does not have is
/// rejected; unknown filter columns are ignored like in the view itself.
pub fn table_state_from_query<R: TableRecord>(
    params: &HashMap<String, String>,
) -> AppResult<TableState> {
    let mut state = TableState::new();

    if let Some(column) = params.get("sort").filter(|c| !c.is_empty()) {
        if !R::has_column(column) {
            return Err(AppError::BadRequest(format!("Unknown sort column: {}", column)));
        }
        let direction = match params.get("order").map(String::as_str) {
            None | Some("") | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(other) => {
                return Err(AppError::BadRequest(format!("Unknown sort order: {}", other)))
            }
        };
        state = state.with_sort(column.as_str(), direction);
    }

    if let Some(group) = params.get("group") {
        let grouped = match group.as_str() {
            "" | "true" | "1" => true,
            "false" | "0" => false,
            other => return Err(AppError::BadRequest(format!("Invalid group flag: {}", other))),
        };
        state = state.with_grouping(grouped);
    }

    for (key, value) in params {
        if let Some(column) = key.strip_prefix(FILTER_PREFIX) {
            state = state.with_filter(column, value.as_str());
        }
    }

    Ok(state)
}
