use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::Value;
use tracing::debug;

use hotline_types::api::SendMessageRequest;

use crate::auth::AppState;
use crate::error::{ApiError, internal, msg, parse_body, rejected};

// No route here checks that the caller is one of the participants: anyone
// who knows two user ids can read their conversation.

/// GET /api/messages/{user_id} — everything the user sent or received.
pub async fn get_user_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .store
        .get_user_messages(&user_id)
        .map_err(internal(msg::MESSAGES_FETCH_FAILED))?;

    Ok(Json(messages))
}

/// GET /api/messages/between/{user_id1}/{user_id2} — one conversation, oldest first.
/// Clients poll this every couple of seconds while a chat is open.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path((user_id1, user_id2)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .store
        .get_messages_between_users(&user_id1, &user_id2)
        .map_err(internal(msg::MESSAGES_FETCH_FAILED))?;

    Ok(Json(messages))
}

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: SendMessageRequest = parse_body(payload, msg::INVALID_MESSAGE)?;

    let message = state
        .store
        .create_message(&req.sender_id, &req.receiver_id, &req.content)
        .map_err(rejected(msg::INVALID_MESSAGE))?;

    debug!(
        message_id = %message.id,
        sender_id = %message.sender_id,
        receiver_id = %message.receiver_id,
        "Message stored"
    );
    Ok(Json(message))
}
