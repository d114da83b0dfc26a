//! Equipment API endpoints

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
    models::{equipment::Equipment, RecordKind},
    services::tables::table_state_from_query,
    views::TableView,
};

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = crate::models::NewEquipment,
    responses(
        (status = 201, description = "Equipment created", body = SubmissionResponse),
        (status = 422, description = "Field validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(input): Json<Value>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let record = state
        .services
        .submissions
        .submit(RecordKind::Equipment, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse::saved(&record)?)))
}

/// Equipment as a sorted, filtered and optionally grouped table
#[utoipa::path(
    get,
    path = "/equipment/table",
    tag = "equipment",
    params(
        ("sort" = Option<String>, Query, description = "Column to sort by"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("group" = Option<bool>, Query, description = "Group rows by department")
    ),
    responses(
        (status = 200, description = "Derived table view")
    )
)]
pub async fn equipment_table(
    State(state): State<crate::AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<TableView<Equipment>>> {
    let table_state = table_state_from_query::<Equipment>(&params)?;
    let view = state.services.tables.equipment_table(&table_state).await?;
    Ok(Json(view))
}
