//! Batch edit API route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use fieldhand_baselinker::apply_batch;
use fieldhand_core::{ApplyResult, FieldEdit, InventoryId};

use crate::error::AppError;
use crate::state::AppState;

/// Batch edit request body.
#[derive(Debug, Deserialize)]
pub struct EditsRequest {
    pub edits: Vec<FieldEdit>,
}

/// Batch edit response body.
#[derive(Debug, Serialize)]
pub struct EditsResponse {
    pub results: Vec<ApplyResult>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Apply a batch of supplementary-field edits.
///
/// Row failures come back in the response body with a 200; only a rejected
/// token or a failed field lookup turns into an error status.
#[instrument(skip(state, request), fields(edits = request.edits.len()))]
pub async fn apply(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
    Json(request): Json<EditsRequest>,
) -> Result<Json<EditsResponse>, AppError> {
    let report =
        apply_batch(state.client(), InventoryId::new(inventory_id), request.edits).await?;

    let succeeded = report.succeeded();
    let failed = report.failed();

    Ok(Json(EditsResponse {
        results: report.results,
        succeeded,
        failed,
    }))
}

// ===== Tests =====
