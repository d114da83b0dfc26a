//! Derived table views over loaded collections

pub mod columns;
pub mod table;

pub use columns::MaintenanceRow;
pub use table::{
    derive_view, CellValue, Column, SortDirection, SortKey, Table, TableAction, TableRecord,
    TableState, TableView,
};
