//! Chat endpoint handler.
//!
//! POST /api/chat - Relay one user message and return the model's reply.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Success body for POST /api/chat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: String,
}

/// POST /api/chat - Persist the user turn, generate and persist the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = state
        .relay
        .chat(&request.session_id, &request.message)
        .await
        .map_err(AppError::Chat)?;

    Ok(Json(ChatResponse {
        reply,
        session_id: request.session_id,
    }))
}
