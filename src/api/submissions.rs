//! Form submission endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{error::AppResult, models::Record};

pub const SAVED_MESSAGE: &str = "Data saved successfully";

/// Collection selector for a submission
#[derive(Debug, Deserialize, IntoParams)]
pub struct SubmissionQuery {
    /// `equipment` or `maintenance`
    #[serde(rename = "formType")]
    pub form_type: Option<String>,
}

/// Acknowledgment of a saved record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub message: String,
    /// Identifier attached at submission time
    pub id: Uuid,
    /// The record as persisted
    #[schema(value_type = Object)]
    pub record: Value,
}

impl SubmissionResponse {
    pub(crate) fn saved(record: &Record) -> AppResult<Self> {
        Ok(Self {
            message: SAVED_MESSAGE.to_string(),
            id: record.id(),
            record: serde_json::to_value(record)?,
        })
    }
}

/// Submit one record to the collection named by `formType`
#[utoipa::path(
    post,
    path = "/submissions",
    tag = "submissions",
    params(SubmissionQuery),
    request_body(content = Object, description = "One equipment or maintenance record"),
    responses(
        (status = 201, description = "Record saved", body = SubmissionResponse),
        (status = 400, description = "Missing or unknown form type", body = crate::error::ErrorResponse),
        (status = 422, description = "Field validation failed", body = crate::error::ErrorResponse),
        (status = 504, description = "Save timed out", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_form(
    State(state): State<crate::AppState>,
    Query(query): Query<SubmissionQuery>,
    Json(input): Json<Value>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let record = state
        .services
        .submissions
        .submit_named(query.form_type.as_deref(), &input)
        .await?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse::saved(&record)?)))
}
