//! Message board handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use trek_core::Message;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// `GET /api/messages`
pub async fn list_messages(State(state): State<AppState>) -> Json<MessageList> {
    Json(MessageList { messages: state.board.list() })
}

/// `POST /api/messages`
pub async fn create_message(
    State(state): State<AppState>,
    body: Result<Json<CreateMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let text = match body {
        Ok(Json(CreateMessage { message: Some(text) })) => text,
        Ok(_) => return Err(message_required()),
        Err(rejection) => {
            debug!(%rejection, "Rejected message body");
            return Err(message_required());
        }
    };

    let message = state.board.append(&text).ok_or_else(message_required)?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `DELETE /api/messages/{id}`
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if state.board.delete(&id) {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::NotFound("Message not found".to_string()))
    }
}

fn message_required() -> ApiError {
    ApiError::BadRequest("Message is required".to_string())
}
