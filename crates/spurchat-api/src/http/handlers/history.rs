//! History endpoint handler.
//!
//! GET /api/history/{session_id} - Ordered transcript for a session.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use spurchat_types::message::{Sender, StoredMessage};

use crate::http::error::AppError;
use crate::state::AppState;

/// One transcript entry as exposed over HTTP.
///
/// Only the fields the client renders; store-internal ids stay internal.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredMessage> for HistoryEntry {
    fn from(message: StoredMessage) -> Self {
        Self {
            sender: message.sender,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

/// GET /api/history/{session_id} - Messages in creation order.
///
/// A session with no history returns an empty array, never an error, so a
/// freshly generated client-side session id can be queried safely.
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let messages = state
        .relay
        .history(&session_id)
        .await
        .map_err(AppError::History)?;

    Ok(Json(messages.into_iter().map(HistoryEntry::from).collect()))
}
