//! HTTP layer for the chat relay.
//!
//! Axum-based JSON API at `/api/` with CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
