//! Chat relay orchestration.
//!
//! `RelayService` sequences a chat turn: ensure session, record the user
//! message, call the completion provider, record the reply.

pub mod service;

pub use service::{RelayError, RelayService};
