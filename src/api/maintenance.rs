//! Maintenance API endpoints

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::submissions::SubmissionResponse;
use crate::{
    error::AppResult,
    models::{maintenance::MaintenanceRecord, RecordKind},
    services::tables::table_state_from_query,
    views::{MaintenanceRow, TableView},
};

/// List all maintenance records
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    responses(
        (status = 200, description = "Maintenance records", body = Vec<MaintenanceRecord>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    let records = state.services.maintenance.list().await?;
    Ok(Json(records))
}

/// Create a maintenance record
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = crate::models::NewMaintenance,
    responses(
        (status = 201, description = "Maintenance record created", body = SubmissionResponse),
        (status = 422, description = "Field validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    Json(input): Json<Value>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let record = state
        .services
        .submissions
        .submit(RecordKind::Maintenance, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse::saved(&record)?)))
}

/// Maintenance records as a table, equipment references resolved to names
#[utoipa::path(
    get,
    path = "/maintenance/table",
    tag = "maintenance",
    params(
        ("sort" = Option<String>, Query, description = "Column to sort by"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("group" = Option<bool>, Query, description = "Group rows by equipment")
    ),
    responses(
        (status = 200, description = "Derived table view")
    )
)]
pub async fn maintenance_table(
    State(state): State<crate::AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<TableView<MaintenanceRow>>> {
    let table_state = table_state_from_query::<MaintenanceRow>(&params)?;
    let view = state.services.tables.maintenance_table(&table_state).await?;
    Ok(Json(view))
}
