//! Table columns for the record types

use serde::Serialize;

use super::table::{CellValue, Column, TableRecord};
use crate::models::{maintenance::resolve_reference, Equipment, MaintenanceRecord};

impl TableRecord for Equipment {
    const COLUMNS: &'static [Column] = &[
        Column { key: "name", header: "Name" },
        Column { key: "location", header: "Location" },
        Column { key: "department", header: "Department" },
        Column { key: "model", header: "Model" },
        Column { key: "serialNumber", header: "Serial Number" },
        Column { key: "installDate", header: "Install Date" },
        Column { key: "status", header: "Status" },
    ];
    const GROUP_COLUMN: &'static str = "department";

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => CellValue::Text(self.name.clone()),
            "location" => CellValue::Text(self.location.clone()),
            "department" => CellValue::Text(self.department.to_string()),
            "model" => CellValue::Text(self.model.clone()),
            "serialNumber" => CellValue::Text(self.serial_number.clone()),
            "installDate" => CellValue::Date(self.install_date),
            "status" => CellValue::Text(self.status.to_string()),
            _ => CellValue::Empty,
        }
    }
}

/// Maintenance record with its equipment reference resolved for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRow {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    /// Name of the referenced equipment, or the raw reference if dangling
    pub equipment_name: String,
}

impl MaintenanceRow {
    pub fn resolve(records: Vec<MaintenanceRecord>, equipment: &[Equipment]) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| {
                let equipment_name = resolve_reference(&record.equipment, equipment)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| record.equipment.clone());
                MaintenanceRow {
                    record,
                    equipment_name,
                }
            })
            .collect()
    }
}

impl TableRecord for MaintenanceRow {
    const COLUMNS: &'static [Column] = &[
        Column { key: "equipmentName", header: "Equipment" },
        Column { key: "date", header: "Date" },
        Column { key: "type", header: "Type" },
        Column { key: "technician", header: "Technician" },
        Column { key: "hoursSpent", header: "Hours Spent" },
        Column { key: "description", header: "Description" },
        Column { key: "partsReplaced", header: "Parts Replaced" },
        Column { key: "priority", header: "Priority" },
        Column { key: "completionStatus", header: "Completion Status" },
    ];
    const GROUP_COLUMN: &'static str = "equipmentName";

    fn cell(&self, column: &str) -> CellValue {
        let r = &self.record;
        match column {
            "equipmentName" => CellValue::Text(self.equipment_name.clone()),
            "date" => CellValue::Date(r.date),
            "type" => r
                .maintenance_type
                .map(|t| CellValue::Text(t.to_string()))
                .unwrap_or(CellValue::Empty),
            "technician" => CellValue::Text(r.technician.clone()),
            "hoursSpent" => CellValue::Number(r.hours_spent),
            "description" => CellValue::Text(r.description.clone()),
            "partsReplaced" => CellValue::List(r.parts_replaced.clone()),
            "priority" => CellValue::Text(r.priority.to_string()),
            "completionStatus" => CellValue::Text(r.completion_status.to_string()),
            _ => CellValue::Empty,
        }
    }
}
