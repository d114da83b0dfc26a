//! Data models for Maintrack

pub mod enums;
pub mod equipment;
pub mod maintenance;

// Re-export commonly used types
pub use enums::{CompletionStatus, Department, EquipmentStatus, MaintenanceType, Priority};
pub use equipment::{Equipment, NewEquipment};
pub use maintenance::{MaintenanceRecord, NewMaintenance};

use serde::Serialize;

/// The two record types and their collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Equipment,
    Maintenance,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Equipment, RecordKind::Maintenance];

    /// Collection name used in `formType` and in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Equipment => "equipment",
            RecordKind::Maintenance => "maintenance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated record of either kind, without id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedRecord {
    Equipment(NewEquipment),
    Maintenance(NewMaintenance),
}

/// A persisted record of either kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Equipment(Equipment),
    Maintenance(MaintenanceRecord),
}

impl ValidatedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            ValidatedRecord::Equipment(_) => RecordKind::Equipment,
            ValidatedRecord::Maintenance(_) => RecordKind::Maintenance,
        }
    }

    pub fn with_id(self, id: uuid::Uuid) -> Record {
        match self {
            ValidatedRecord::Equipment(e) => Record::Equipment(e.with_id(id)),
            ValidatedRecord::Maintenance(m) => Record::Maintenance(m.with_id(id)),
        }
    }
}

impl Record {
    pub fn id(&self) -> uuid::Uuid {
        match self {
            Record::Equipment(e) => e.id,
            Record::Maintenance(m) => m.id,
        }
    }
}
