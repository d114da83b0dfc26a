//! API handlers for Maintrack REST endpoints

pub mod collections;
pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod submissions;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let data_dir = state.config.storage.data_dir.clone();

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Submissions
        .route("/submissions", post(submissions::submit_form))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route("/equipment/table", get(equipment::equipment_table))
        // Maintenance
        .route(
            "/maintenance",
            get(maintenance::list_maintenance).post(maintenance::create_maintenance),
        )
        .route("/maintenance/table", get(maintenance::maintenance_table))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        // Collections
        .route(
            "/collections/:collection/quarantine",
            post(collections::quarantine_collection),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        // Raw collection files, as the display views fetch them
        .nest_service("/data", ServeDir::new(data_dir))
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
