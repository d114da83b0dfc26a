//! Dashboard aggregation

use std::collections::BTreeMap;

use crate::{
    api::dashboard::{DashboardSummary, DepartmentHours, RecentActivity, StatEntry},
    error::AppResult,
    models::{Department, Equipment, EquipmentStatus, MaintenanceRecord},
    repository::Repository,
};

/// Number of maintenance records listed under recent activity
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Bucket for maintenance whose equipment reference resolves to nothing
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Load both collections and fold them into the dashboard summary
    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        let equipment = self.repository.equipment_list().await?;
        let maintenance = self.repository.maintenance_list().await?;
        Ok(summarize(&equipment, &maintenance))
    }
}

/// Pure fold over already loaded collections
pub fn summarize(equipment: &[Equipment], maintenance: &[MaintenanceRecord]) -> DashboardSummary {
    DashboardSummary {
        status_breakdown: status_breakdown(equipment),
        hours_by_department: hours_by_department(equipment, maintenance),
        recent_activity: recent_activity(equipment, maintenance),
    }
}

/// Equipment count per status, in status order, empty statuses omitted
pub fn status_breakdown(equipment: &[Equipment]) -> Vec<StatEntry> {
    let mut counts: BTreeMap<EquipmentStatus, i64> = BTreeMap::new();
    for e in equipment {
        *counts.entry(e.status).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(status, value)| StatEntry {
            label: status.to_string(),
            value,
        })
        .collect()
}

/// Hours per department of the serviced equipment; dangling references
/// land in [`UNKNOWN_DEPARTMENT`], listed last.
pub fn hours_by_department(
    equipment: &[Equipment],
    maintenance: &[MaintenanceRecord],
) -> Vec<DepartmentHours> {
    let mut known: BTreeMap<Department, f64> = BTreeMap::new();
    let mut unknown: Option<f64> = None;

    for record in maintenance {
        match record.resolve_equipment(equipment) {
            Some(e) => *known.entry(e.department).or_default() += record.hours_spent,
            None => *unknown.get_or_insert(0.0) += record.hours_spent,
        }
    }

    let mut hours: Vec<DepartmentHours> = known
        .into_iter()
        .map(|(department, hours)| DepartmentHours {
            department: department.to_string(),
            hours,
        })
        .collect();
    if let Some(hours_unknown) = unknown {
        hours.push(DepartmentHours {
            department: UNKNOWN_DEPARTMENT.to_string(),
            hours: hours_unknown,
        });
    }
    hours
}

/// The newest maintenance records by date; on equal dates the later
/// submission comes first.
pub fn recent_activity(
    equipment: &[Equipment],
    maintenance: &[MaintenanceRecord],
) -> Vec<RecentActivity> {
    let mut ordered: Vec<(usize, &MaintenanceRecord)> = maintenance.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ib.cmp(ia)));

    ordered
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|(_, record)| {
            let resolved = record.resolve_equipment(equipment);
            RecentActivity {
                id: record.id,
                date: record.date,
                description: record.description.clone(),
                equipment: resolved
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| record.equipment.clone()),
                department: resolved
                    .map(|e| e.department.to_string())
                    .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
                hours_spent: record.hours_spent,
            }
        })
        .collect()
}
