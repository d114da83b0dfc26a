//! Maintenance service

use crate::{error::AppResult, models::maintenance::MaintenanceRecord, repository::Repository};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceRecord>> {
        self.repository.maintenance_list().await
    }
}
