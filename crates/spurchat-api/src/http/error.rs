//! Application error type mapping relay failures to HTTP responses.
//!
//! All relay failures collapse to a generic 500 whose body depends only on
//! which endpoint was called. Causes are logged server-side; the client
//! never learns whether the store or the completion service failed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use spurchat_core::relay::RelayError;

/// Application-level error tagged by the failing endpoint.
#[derive(Debug)]
pub enum AppError {
    /// A chat request failed.
    Chat(RelayError),
    /// A history read failed.
    History(RelayError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (message, cause) = match &self {
            AppError::Chat(e) => ("Brain malfunction", e),
            AppError::History(e) => ("Failed to fetch history", e),
        };

        tracing::error!(error = %cause, "request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}
