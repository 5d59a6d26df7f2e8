use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use hotline_types::models::User;

use crate::auth::AppState;
use crate::error::{ApiError, internal, msg};

/// GET /api/users — every regular user; the admin is never listed.
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users: Vec<User> = state
        .store
        .get_all_users()
        .map_err(internal(msg::USERS_FETCH_FAILED))?
        .into_iter()
        .filter(|u| !u.is_admin)
        .collect();

    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .store
        .get_user(&id)
        .map_err(internal(msg::USER_FETCH_FAILED))?
        .ok_or(ApiError::NotFound(msg::USER_NOT_FOUND))?;

    Ok(Json(user))
}
