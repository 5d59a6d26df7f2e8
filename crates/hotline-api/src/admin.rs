use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::Value;
use tracing::info;

use hotline_types::api::UpdateAdminStatusRequest;

use crate::auth::AppState;
use crate::error::{ApiError, internal, msg, parse_body, rejected};

/// GET /api/admin/status
pub async fn get_status(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let status = state
        .store
        .get_admin_status()
        .map_err(internal(msg::STATUS_FETCH_FAILED))?;

    Ok(Json(status))
}

/// PUT /api/admin/status — any status other than `available`/`busy` is
/// rejected before the record is touched.
pub async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: UpdateAdminStatusRequest = parse_body(payload, msg::INVALID_STATUS)?;

    let status = state
        .store
        .update_admin_status(req.status)
        .map_err(rejected(msg::INVALID_STATUS))?;

    info!(status = ?status.status, "Admin status updated");
    Ok(Json(status))
}
