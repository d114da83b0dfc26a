//! Maintenance domain methods on Repository

use std::time::Duration;

use super::Repository;
use crate::{
    error::AppResult,
    models::{maintenance::MaintenanceRecord, RecordKind},
};

impl Repository {
    /// List all maintenance records in insertion order
    pub async fn maintenance_list(&self) -> AppResult<Vec<MaintenanceRecord>> {
        self.load(RecordKind::Maintenance).await
    }

    /// Append one maintenance record, waiting at most `wait` for the collection
    pub async fn maintenance_create(&self, record: &MaintenanceRecord, wait: Duration) -> AppResult<()> {
        self.append_within(RecordKind::Maintenance, record, wait).await
    }
}
