//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{collections, dashboard, equipment, health, maintenance, submissions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Maintrack API",
        version = "1.0.0",
        description = "Equipment and maintenance record keeping REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Submissions
        submissions::submit_form,
        // Equipment
        equipment::list_equipment,
        equipment::create_equipment,
        equipment::equipment_table,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        maintenance::maintenance_table,
        // Dashboard
        dashboard::get_dashboard,
        // Collections
        collections::quarantine_collection,
    ),
    components(
        schemas(
            // Records
            crate::models::Equipment,
            crate::models::NewEquipment,
            crate::models::MaintenanceRecord,
            crate::models::NewMaintenance,
            crate::models::Department,
            crate::models::EquipmentStatus,
            crate::models::MaintenanceType,
            crate::models::Priority,
            crate::models::CompletionStatus,
            // Submissions
            submissions::SubmissionResponse,
            // Dashboard
            dashboard::DashboardSummary,
            dashboard::StatEntry,
            dashboard::DepartmentHours,
            dashboard::RecentActivity,
            // Collections
            collections::QuarantineResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "submissions", description = "Form submissions"),
        (name = "equipment", description = "Equipment records"),
        (name = "maintenance", description = "Maintenance records"),
        (name = "dashboard", description = "Aggregated summaries"),
        (name = "collections", description = "Collection file maintenance")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
