//! Maintenance record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{CompletionStatus, MaintenanceType, Priority};
use super::equipment::Equipment;

/// Maintenance record as persisted in `maintenanceData.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    /// Reference to the serviced equipment, see [`MaintenanceRecord::resolve_equipment`]
    pub equipment: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<MaintenanceType>,
    pub technician: String,
    pub hours_spent: f64,
    pub description: String,
    #[serde(default)]
    pub parts_replaced: Vec<String>,
    pub priority: Priority,
    pub completion_status: CompletionStatus,
}

/// Validated maintenance record, before an id has been attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenance {
    pub equipment: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<MaintenanceType>,
    pub technician: String,
    pub hours_spent: f64,
    pub description: String,
    #[serde(default)]
    pub parts_replaced: Vec<String>,
    pub priority: Priority,
    pub completion_status: CompletionStatus,
}

impl NewMaintenance {
    pub fn with_id(self, id: Uuid) -> MaintenanceRecord {
        MaintenanceRecord {
            id,
            equipment: self.equipment,
            date: self.date,
            maintenance_type: self.maintenance_type,
            technician: self.technician,
            hours_spent: self.hours_spent,
            description: self.description,
            parts_replaced: self.parts_replaced,
            priority: self.priority,
            completion_status: self.completion_status,
        }
    }
}

impl MaintenanceRecord {
    /// Resolve the equipment reference.
    ///
    /// The reference is matched against equipment ids first. Records written
    /// before references were ids carry the display name instead, so an exact
    /// name match is tried second. `None` means the reference is dangling.
    pub fn resolve_equipment<'a>(&self, equipment: &'a [Equipment]) -> Option<&'a Equipment> {
        resolve_reference(&self.equipment, equipment)
    }
}

/// Id-then-name resolution shared by maintenance records and the table view
pub fn resolve_reference<'a>(reference: &str, equipment: &'a [Equipment]) -> Option<&'a Equipment> {
    if let Ok(id) = Uuid::parse_str(reference) {
        if let Some(found) = equipment.iter().find(|e| e.id == id) {
            return Some(found);
        }
    }
    equipment.iter().find(|e| e.name == reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Department, EquipmentStatus};

    fn press(name: &str) -> Equipment {
        Equipment {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: "Bay 1".to_string(),
            department: Department::Machining,
            model: "P-100".to_string(),
            serial_number: "SN1".to_string(),
            install_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            status: EquipmentStatus::Operational,
        }
    }

    #[test]
    fn resolves_by_id_before_name() {
        let a = press("Press A");
        // a second machine whose *name* is the first machine's id
        let decoy = press(&a.id.to_string());
        let fleet = vec![decoy.clone(), a.clone()];
        let found = resolve_reference(&a.id.to_string(), &fleet).unwrap();
        assert_eq!(found.id, a.id);
    }

    #[test]
    fn falls_back_to_legacy_name() {
        let fleet = vec![press("Press A")];
        assert_eq!(resolve_reference("Press A", &fleet).unwrap().name, "Press A");
        assert!(resolve_reference("Press B", &fleet).is_none());
    }

    #[test]
    fn type_field_uses_wire_name() {
        let record = NewMaintenance {
            equipment: "Press A".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            maintenance_type: Some(MaintenanceType::Repair),
            technician: "Jo".into(),
            hours_spent: 2.5,
            description: "Replaced the hydraulic seal".into(),
            parts_replaced: vec!["seal".into()],
            priority: Priority::High,
            completion_status: CompletionStatus::PendingParts,
        }
        .with_id(Uuid::nil());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Repair");
        assert_eq!(json["hoursSpent"], 2.5);
        assert_eq!(json["completionStatus"], "Pending Parts");
        assert_eq!(json["partsReplaced"][0], "seal");
    }
}
