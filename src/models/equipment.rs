//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{Department, EquipmentStatus};

/// Equipment record as persisted in `equipmentData.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    /// Display name
    pub name: String,
    pub location: String,
    pub department: Department,
    pub model: String,
    /// Alphanumeric serial number
    pub serial_number: String,
    pub install_date: NaiveDate,
    pub status: EquipmentStatus,
}

/// Validated equipment, before an id has been attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub location: String,
    pub department: Department,
    pub model: String,
    pub serial_number: String,
    pub install_date: NaiveDate,
    pub status: EquipmentStatus,
}

impl NewEquipment {
    pub fn with_id(self, id: Uuid) -> Equipment {
        Equipment {
            id,
            name: self.name,
            location: self.location,
            department: self.department,
            model: self.model,
            serial_number: self.serial_number,
            install_date: self.install_date,
            status: self.status,
        }
    }
}
