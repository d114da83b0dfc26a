//! Collection maintenance endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, repository::resolve_collection};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuarantineResponse {
    pub collection: String,
    /// Where the malformed file was moved
    pub moved_to: String,
}

/// Move a malformed collection file aside so new records can be saved
#[utoipa::path(
    post,
    path = "/collections/{collection}/quarantine",
    tag = "collections",
    params(("collection" = String, Path, description = "equipment or maintenance")),
    responses(
        (status = 200, description = "File quarantined", body = QuarantineResponse),
        (status = 400, description = "Unknown or healthy collection", body = crate::error::ErrorResponse)
    )
)]
pub async fn quarantine_collection(
    State(state): State<crate::AppState>,
    Path(collection): Path<String>,
) -> AppResult<Json<QuarantineResponse>> {
    let kind = resolve_collection(Some(&collection))?;
    let moved_to = state.services.repository.quarantine(kind).await?;
    Ok(Json(QuarantineResponse {
        collection: kind.to_string(),
        moved_to: moved_to.display().to_string(),
    }))
}
