//! Business logic services

pub mod dashboard;
pub mod equipment;
pub mod maintenance;
pub mod submissions;
pub mod tables;

use crate::{config::StorageConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub equipment: equipment::EquipmentService,
    pub maintenance: maintenance::MaintenanceService,
    pub submissions: submissions::SubmissionService,
    pub tables: tables::TableService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, storage: &StorageConfig) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            submissions: submissions::SubmissionService::new(
                repository.clone(),
                storage.write_timeout(),
            ),
            tables: tables::TableService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            repository,
        }
    }
}
