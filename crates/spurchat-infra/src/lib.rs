//! Infrastructure layer for the SpurShop chat relay.
//!
//! Contains implementations of the traits defined in `spurchat-core`:
//! the SQLite session/message store and the Gemini completion client,
//! plus environment-driven configuration.

pub mod config;
pub mod gemini;
pub mod sqlite;
