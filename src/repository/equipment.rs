//! Equipment domain methods on Repository

use std::time::Duration;

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{equipment::Equipment, RecordKind},
};

impl Repository {
    /// List all equipment in insertion order
    pub async fn equipment_list(&self) -> AppResult<Vec<Equipment>> {
        self.load(RecordKind::Equipment).await
    }

    /// Append one equipment record, waiting at most `wait` for the collection
    pub async fn equipment_create(&self, equipment: &Equipment, wait: Duration) -> AppResult<()> {
        self.append_within(RecordKind::Equipment, equipment, wait).await
    }

    /// Whether an equipment record with this id has been saved
    pub async fn equipment_exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.equipment_list().await?.iter().any(|e| e.id == id))
    }
}
